//! Record decoder
//!
//! A section is a header block followed by one fixed-size group of lines per
//! SES element. [`RecordLayout`] says how many lines (or whole groups) to
//! discard first and how many lines make up one group; the typed decoders
//! then read fields at fixed offsets within each group.

use serde::{Deserialize, Serialize};

use super::section::RawReport;
use super::{grammar, sections};
use crate::domain::{
    CurrentRecord, FanRecord, PsuRecord, TemperatureRecord, ThresholdBand, VoltageRecord,
};
use crate::error::ParseError;

/// How a section is sliced into records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    /// Lines discarded before slicing
    pub skip_lines: usize,
    /// Whole records discarded after slicing
    pub skip_records: usize,
    /// Lines per record
    pub stride: usize,
}

impl RecordLayout {
    pub const fn new(skip_lines: usize, stride: usize) -> Self {
        Self {
            skip_lines,
            skip_records: 0,
            stride,
        }
    }

    pub const fn skipping_records(mut self, count: usize) -> Self {
        self.skip_records = count;
        self
    }

    /// Slice `lines` into records; the last record may be short
    pub fn records<'a>(&self, lines: &'a [String]) -> impl Iterator<Item = &'a [String]> {
        lines
            .get(self.skip_lines..)
            .unwrap_or_default()
            .chunks(self.stride.max(1))
            .skip(self.skip_records)
    }
}

/// Layout of voltage/current sections: records plus the offset of the reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogLayout {
    pub records: RecordLayout,
    pub field_offset: usize,
}

/// Layout of power supply sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsuLayout {
    pub records: RecordLayout,
    /// Offset of the `Hot swap=...` line
    pub hw_status_offset: usize,
    /// Offset of the `... AC fail=0, DC fail=0` line
    pub fault_status_offset: usize,
}

/// One record with bounds- and shape-checked field access
struct Record<'a> {
    section: &'static str,
    position: usize,
    lines: &'a [String],
}

impl<'a> Record<'a> {
    fn line(&self, offset: usize) -> Result<&'a str, ParseError> {
        self.lines
            .get(offset)
            .map(String::as_str)
            .ok_or_else(|| ParseError::TruncatedRecord {
                section: self.section.to_string(),
                record: self.position,
                found: self.lines.len(),
                needed: offset + 1,
            })
    }

    fn field<T>(
        &self,
        offset: usize,
        expected: &'static str,
        matcher: impl Fn(&'a str) -> Option<T>,
    ) -> Result<T, ParseError> {
        let line = self.line(offset)?;
        matcher(line).ok_or_else(|| ParseError::UnexpectedLine {
            section: self.section.to_string(),
            expected,
            line: line.to_string(),
        })
    }

    fn element_index(&self) -> Result<u32, ParseError> {
        self.field(0, "Element <n> descriptor:", grammar::element_index)
    }

    fn status(&self) -> Result<&'a str, ParseError> {
        self.field(1, "... status: <text>", grammar::status_text)
    }
}

fn records<'a>(
    report: &'a RawReport,
    section: &'static str,
    layout: &RecordLayout,
) -> Result<impl Iterator<Item = Record<'a>>, ParseError> {
    let lines = report.require(section)?;
    Ok(layout
        .records(lines)
        .enumerate()
        .map(move |(position, lines)| Record {
            section,
            position,
            lines,
        }))
}

/// Cooling elements: index, status, `Actual speed=<n> rpm` on line 3
pub fn decode_fans(report: &RawReport, layout: &RecordLayout) -> Result<Vec<FanRecord>, ParseError> {
    records(report, sections::COOLING, layout)?
        .map(|rec| {
            Ok(FanRecord {
                index: rec.element_index()?,
                status: rec.status()?.to_string(),
                speed_rpm: rec.field(3, "Actual speed=<n> rpm", grammar::actual_speed)?,
            })
        })
        .collect()
}

/// Temperature elements; a `reserved` data line means the sensor is absent
pub fn decode_temperatures(
    report: &RawReport,
    layout: &RecordLayout,
) -> Result<Vec<TemperatureRecord>, ParseError> {
    records(report, sections::TEMPERATURE, layout)?
        .map(|rec| {
            let index = rec.element_index()?;
            let status = rec.status()?.to_string();
            let celsius = if rec.line(4)?.contains("reserved") {
                None
            } else {
                Some(rec.field(4, "Temperature=<n> C", grammar::temperature)?)
            };
            Ok(TemperatureRecord {
                index,
                status,
                celsius,
            })
        })
        .collect()
}

/// Temperature thresholds from the threshold page, by position
///
/// A record matching neither the high nor the low line has no thresholds.
/// A record with only one side gets an unbounded band on the other.
pub fn decode_temperature_thresholds(
    report: &RawReport,
    layout: &RecordLayout,
) -> Result<Vec<Option<ThresholdBand>>, ParseError> {
    records(report, sections::TEMPERATURE, layout)?
        .map(|rec| {
            let high = grammar::high_limits(rec.line(1)?);
            let low = grammar::low_limits(rec.line(2)?);
            if high.is_none() && low.is_none() {
                return Ok(None);
            }
            let mut band = ThresholdBand::UNBOUNDED;
            if let Some((critical, warning)) = high {
                band = band.with_high(critical.into(), warning.into());
            }
            if let Some((warning, critical)) = low {
                band = band.with_low(warning.into(), critical.into());
            }
            Ok(Some(band))
        })
        .collect()
}

fn decode_analog(
    report: &RawReport,
    section: &'static str,
    layout: &AnalogLayout,
    wanted: impl Fn(usize) -> bool,
    expected: &'static str,
    matcher: fn(&str) -> Option<f64>,
) -> Result<Vec<(usize, f64)>, ParseError> {
    records(report, section, &layout.records)?
        .filter(|rec| wanted(rec.position))
        .map(|rec| Ok((rec.position, rec.field(layout.field_offset, expected, matcher)?)))
        .collect()
}

/// Voltage channels, indexed by position after the skipped records
///
/// Only channels accepted by `wanted` are read; the others may hold any text.
pub fn decode_voltages(
    report: &RawReport,
    layout: &AnalogLayout,
    wanted: impl Fn(usize) -> bool,
) -> Result<Vec<VoltageRecord>, ParseError> {
    let readings = decode_analog(
        report,
        sections::VOLTAGE,
        layout,
        wanted,
        "Voltage: <x> volts",
        grammar::voltage,
    )?;
    Ok(readings
        .into_iter()
        .map(|(index, volts)| VoltageRecord { index, volts })
        .collect())
}

/// Current channels, indexed by position after the skipped records
///
/// Only channels accepted by `wanted` are read.
pub fn decode_currents(
    report: &RawReport,
    layout: &AnalogLayout,
    wanted: impl Fn(usize) -> bool,
) -> Result<Vec<CurrentRecord>, ParseError> {
    let readings = decode_analog(
        report,
        sections::CURRENT,
        layout,
        wanted,
        "Current: <x> amps",
        grammar::current,
    )?;
    Ok(readings
        .into_iter()
        .map(|(index, amps)| CurrentRecord { index, amps })
        .collect())
}

/// Power supply elements as raw status lines
pub fn decode_psus(report: &RawReport, layout: &PsuLayout) -> Result<Vec<PsuRecord>, ParseError> {
    records(report, sections::POWER_SUPPLY, &layout.records)?
        .map(|rec| {
            rec.status()?;
            Ok(PsuRecord {
                index: rec.element_index()?,
                status_line: rec.line(1)?.to_string(),
                hw_status_line: rec.line(layout.hw_status_offset)?.to_string(),
                fault_status_line: rec.line(layout.fault_status_offset)?.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.trim().to_string()).collect()
    }

    const COOLING: &str = "    Element type: Cooling, subenclosure id: 0 [ti=3]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Do not remove=0, Hot swap=0, Fail=0, Requested on=0
        Off=0, Actual speed=0 rpm, Fan stopped
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Do not remove=0, Hot swap=0, Fail=0, Requested on=0
        Off=0, Actual speed=7250 rpm, Fan at third lowest speed
      Element 1 descriptor:
        Predicted failure=1, Disabled=0, Swap=0, status: Critical
        Ident=0, Do not remove=0, Hot swap=0, Fail=1, Requested on=0
        Off=0, Actual speed=1200 rpm, Fan at lowest speed
";

    #[test]
    fn test_layout_skips_lines_then_records() {
        let data = lines("a\nb\nc\nd\ne\nf\ng");
        let layout = RecordLayout::new(1, 2).skipping_records(1);
        let chunks: Vec<_> = layout.records(&data).collect();
        assert_eq!(chunks, [&data[3..5], &data[5..7]]);
    }

    #[test]
    fn test_layout_skip_beyond_end() {
        let data = lines("a\nb");
        assert_eq!(RecordLayout::new(5, 4).records(&data).count(), 0);
    }

    #[test]
    fn test_decode_fans() {
        let report = RawReport::parse(COOLING);
        let fans = decode_fans(&report, &RecordLayout::new(5, 4)).unwrap();
        assert_eq!(fans.len(), 2);
        assert_eq!(
            fans[0],
            FanRecord {
                index: 0,
                status: "OK".to_string(),
                speed_rpm: 7250
            }
        );
        assert_eq!(fans[1].status, "Critical");
        assert_eq!(fans[1].speed_rpm, 1200);
    }

    #[test]
    fn test_decode_fans_truncated_record() {
        let text = COOLING.lines().take(8).collect::<Vec<_>>().join("\n");
        let report = RawReport::parse(&text);
        let err = decode_fans(&report, &RecordLayout::new(5, 4)).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TruncatedRecord {
                found: 3,
                needed: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_fans_bad_speed_line() {
        let text = COOLING.replace("Actual speed=7250 rpm", "Actual speed=unknown");
        let report = RawReport::parse(&text);
        let err = decode_fans(&report, &RecordLayout::new(5, 4)).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedLine { .. }));
    }

    #[test]
    fn test_decode_missing_section() {
        let report = RawReport::parse("nothing here");
        assert_eq!(
            decode_fans(&report, &RecordLayout::new(5, 4)),
            Err(ParseError::MissingSection("Cooling".to_string()))
        );
    }

    #[test]
    fn test_decode_temperature_reserved() {
        let text = "    Element type: Temperature sensor, subenclosure id: 0 [ti=4]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0, OT failure=0, OT warning=0, UT failure=0
        UT warning=0
        Temperature: <reserved>
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0, OT failure=0, OT warning=0, UT failure=0
        UT warning=0
        Temperature=31 C
      Element 1 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: Unsupported
        Ident=0, Fail=0, OT failure=0, OT warning=0, UT failure=0
        UT warning=0
        Temperature: <reserved>";
        let report = RawReport::parse(text);
        let temps = decode_temperatures(&report, &RecordLayout::new(6, 5)).unwrap();
        assert_eq!(temps[0].celsius, Some(31));
        assert_eq!(temps[1].celsius, None);
        assert_eq!(temps[1].status, "Unsupported");
    }

    #[test]
    fn test_decode_thresholds_partial_sides() {
        let text = "    Element type: Temperature sensor, subenclosure id: 0 [ti=4]
      Overall descriptor:
        high critical=0, high warning=0
        low warning=0, low critical=0 (in Celsius)
      Element 0 descriptor:
        high critical=58, high warning=53
        low warning=5, low critical=0 (in Celsius)
      Element 1 descriptor:
        high critical=70, high warning=65
        <low thresholds not supported>
      Element 2 descriptor:
        <not supported>
        <not supported>";
        let report = RawReport::parse(text);
        let bands = decode_temperature_thresholds(&report, &RecordLayout::new(4, 3)).unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(
            bands[0],
            Some(ThresholdBand::new(0.0, 5.0, 53.0, 58.0))
        );
        let one_sided = bands[1].unwrap();
        assert_eq!(one_sided.high_critical, 70.0);
        assert_eq!(one_sided.low_critical, f64::NEG_INFINITY);
        assert_eq!(bands[2], None);
    }

    #[test]
    fn test_decode_voltages_skips_summary_records() {
        let text = "    Element type: Voltage sensor, subenclosure id: 0 [ti=5]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: 0.00 volts
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: 12.10 volts
      Element 1 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: 5.02 volts";
        let report = RawReport::parse(text);
        let layout = AnalogLayout {
            records: RecordLayout::new(0, 5).skipping_records(2),
            field_offset: 0,
        };
        let volts = decode_voltages(&report, &layout, |_| true).unwrap();
        assert_eq!(
            volts,
            [
                VoltageRecord {
                    index: 0,
                    volts: 12.10
                },
                VoltageRecord {
                    index: 1,
                    volts: 5.02
                },
            ]
        );
    }

    #[test]
    fn test_decode_voltages_leaves_unwanted_channels_unread() {
        let text = "    Element type: Voltage sensor, subenclosure id: 0 [ti=5]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: 0.00 volts
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: 12.10 volts
      Element 1 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: Unsupported
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: <reserved>
      Element 2 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Warn Under=0, Crit Over=0
        Crit Under=0
        Voltage: 11.98 volts";
        let report = RawReport::parse(text);
        let layout = AnalogLayout {
            records: RecordLayout::new(0, 5).skipping_records(2),
            field_offset: 0,
        };

        let volts = decode_voltages(&report, &layout, |i| i != 1).unwrap();
        let indices: Vec<_> = volts.iter().map(|v| v.index).collect();
        assert_eq!(indices, [0, 2]);
        assert_eq!(volts[1].volts, 11.98);

        let err = decode_voltages(&report, &layout, |_| true).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedLine { .. }));
    }

    #[test]
    fn test_decode_currents_both_layouts_agree() {
        let text = "    Element type: Current sensor, subenclosure id: 0 [ti=6]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Crit Over=0
        Current: 0.00 amps
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Crit Over=0
        Current: 2.34 amps
      Element 1 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Fail=0,  Warn Over=0, Crit Over=0
        Current: 0.51 amps";
        let report = RawReport::parse(text);
        let summary_skip = AnalogLayout {
            records: RecordLayout::new(0, 4).skipping_records(2),
            field_offset: 0,
        };
        let line_skip = AnalogLayout {
            records: RecordLayout::new(5, 4),
            field_offset: 3,
        };
        let a = decode_currents(&report, &summary_skip, |_| true).unwrap();
        let b = decode_currents(&report, &line_skip, |_| true).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[1].amps, 0.51);
    }

    #[test]
    fn test_decode_psus() {
        let text = "    Element type: Power supply, subenclosure id: 0 [ti=2]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Do not remove=0, DC overvoltage=0, DC undervoltage=0
        DC overcurrent=0, Hot swap=0, Fail=0, Requested on=0, Off=0
        Overtmp fail=0, Temperature warn=0, AC fail=0, DC fail=0
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Do not remove=0, DC overvoltage=0, DC undervoltage=0
        DC overcurrent=0, Hot swap=1, Fail=0, Requested on=1, Off=0
        Overtmp fail=0, Temperature warn=0, AC fail=1, DC fail=0";
        let report = RawReport::parse(text);
        let layout = PsuLayout {
            records: RecordLayout::new(6, 5),
            hw_status_offset: 3,
            fault_status_offset: 4,
        };
        let psus = decode_psus(&report, &layout).unwrap();
        assert_eq!(psus.len(), 1);
        assert_eq!(psus[0].index, 0);
        assert_eq!(
            psus[0].hw_status_line,
            "DC overcurrent=0, Hot swap=1, Fail=0, Requested on=1, Off=0"
        );
        assert_eq!(
            psus[0].fault_status_line,
            "Overtmp fail=0, Temperature warn=0, AC fail=1, DC fail=0"
        );
    }

    #[test]
    fn test_decode_psus_extended_layout() {
        let text = "    Element type: Power supply, subenclosure id: 0 [ti=2]
      Overall descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Do not remove=0, DC overvoltage=0, DC undervoltage=0
        DC overcurrent=0, Hot swap=0, Fail=0, Requested on=0, Off=0
        Overtmp fail=0, Temperature warn=0, AC fail=0, DC fail=0
        Output power: 0 W
      Element 0 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: OK
        Ident=0, Do not remove=0, DC overvoltage=0, DC undervoltage=0
        Input power: 212 W
        DC overcurrent=0, Hot swap=1, Fail=0, Requested on=1, Off=0
        Overtmp fail=0, Temperature warn=0, AC fail=0, DC fail=0
        Output power: 188 W
      Element 1 descriptor:
        Predicted failure=0, Disabled=0, Swap=0, status: Critical
        Ident=0, Do not remove=0, DC overvoltage=0, DC undervoltage=0
        Input power: 0 W
        DC overcurrent=0, Hot swap=1, Fail=1, Requested on=1, Off=0
        Overtmp fail=0, Temperature warn=0, AC fail=1, DC fail=1
        Output power: 0 W";
        let report = RawReport::parse(text);
        let layout = PsuLayout {
            records: RecordLayout::new(7, 6),
            hw_status_offset: 4,
            fault_status_offset: 5,
        };
        let psus = decode_psus(&report, &layout).unwrap();
        assert_eq!(psus.len(), 2);
        assert_eq!(
            psus[0].hw_status_line,
            "DC overcurrent=0, Hot swap=1, Fail=0, Requested on=1, Off=0"
        );
        assert_eq!(
            psus[0].fault_status_line,
            "Overtmp fail=0, Temperature warn=0, AC fail=0, DC fail=0"
        );
        assert_eq!(psus[1].index, 1);
        assert_eq!(
            psus[1].status_line,
            "Predicted failure=0, Disabled=0, Swap=0, status: Critical"
        );
        assert_eq!(
            psus[1].fault_status_line,
            "Overtmp fail=0, Temperature warn=0, AC fail=1, DC fail=1"
        );
    }
}
