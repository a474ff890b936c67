//! Built-in enclosure models
//!
//! Xyratex (SP-34106, UD-8435, SP-3584), Dell (MD1420), Lenovo (2U12ENCJ,
//! D32845) and HGST/Western Digital (4U60G2, H4060-J) enclosures.

use super::{AnalogProfile, Channel, FanProfile, ModelProfile, PsuProfile, TemperatureProfile};
use crate::domain::ThresholdBand;
use crate::report::{AnalogLayout, PsuLayout, RecordLayout};

const FAN_LAYOUT: RecordLayout = RecordLayout::new(5, 4);

const TEMPERATURE: TemperatureProfile = TemperatureProfile {
    layout: RecordLayout::new(6, 5),
    threshold_layout: RecordLayout::new(4, 3),
};

/// Each record's reading ends up on the first line of the following chunk
const VOLTAGE_LAYOUT: AnalogLayout = AnalogLayout {
    records: RecordLayout::new(0, 5).skipping_records(2),
    field_offset: 0,
};

const CURRENT_LAYOUT: AnalogLayout = AnalogLayout {
    records: RecordLayout::new(0, 4).skipping_records(2),
    field_offset: 0,
};

const HGST_CURRENT_LAYOUT: AnalogLayout = AnalogLayout {
    records: RecordLayout::new(5, 4),
    field_offset: 3,
};

const PSU_LAYOUT: PsuLayout = PsuLayout {
    records: RecordLayout::new(6, 5),
    hw_status_offset: 3,
    fault_status_offset: 4,
};

/// Lenovo 2U12 adds an informational line per record
const PSU_EXTENDED_LAYOUT: PsuLayout = PsuLayout {
    records: RecordLayout::new(7, 6),
    hw_status_offset: 4,
    fault_status_offset: 5,
};

const OFF: Channel = Channel::NotMonitored;

/// Default tolerance for 5 V and 12 V rails on HGST enclosures
const RAIL_LOW_PCT: f64 = 0.075;
const RAIL_HIGH_PCT: f64 = 0.05;

fn on(min: f64, max: f64) -> Channel {
    Channel::Monitored(ThresholdBand::critical(min, max))
}

/// Fan bands from `(count, min_rpm, max_rpm)` groups in index order
fn fans(groups: &[(usize, f64, f64)]) -> FanProfile {
    let bands = groups
        .iter()
        .flat_map(|&(count, min, max)| std::iter::repeat(ThresholdBand::critical(min, max)).take(count))
        .collect();
    FanProfile {
        layout: FAN_LAYOUT,
        bands,
    }
}

fn analog(layout: AnalogLayout, channels: Vec<Channel>) -> AnalogProfile {
    AnalogProfile { layout, channels }
}

fn nominal(nominals: &[f64], pct_low: f64, pct_high: f64) -> Vec<Channel> {
    nominals
        .iter()
        .map(|&v| Channel::Monitored(ThresholdBand::from_nominal(v, pct_low, pct_high)))
        .collect()
}

fn current_minmax(min: &[f64], max: &[f64]) -> Vec<Channel> {
    min.iter().zip(max).map(|(&lo, &hi)| on(lo, hi)).collect()
}

fn psu(layout: PsuLayout, online_slots: &[u32]) -> PsuProfile {
    PsuProfile {
        layout,
        online_slots: online_slots.to_vec(),
    }
}

fn sp_34106() -> ModelProfile {
    ModelProfile {
        model: "SP-34106-CFFE12P".to_string(),
        fan: fans(&[(8, 6000.0, 9000.0), (2, 2000.0, 5000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(
            VOLTAGE_LAYOUT,
            vec![
                on(11.5, 12.5),
                on(190.0, 255.0),
                OFF,
                OFF,
                on(11.5, 12.5),
                on(190.0, 255.0),
                OFF,
                OFF,
            ],
        ),
        current: analog(
            CURRENT_LAYOUT,
            vec![
                on(25.0, 50.0),
                on(1.0, 3.0),
                OFF,
                OFF,
                on(25.0, 50.0),
                on(1.0, 3.0),
                OFF,
                OFF,
            ],
        ),
        psu: psu(PSU_LAYOUT, &[0, 2]),
    }
}

/// UD-8435-E6EBD and SP-3584-E12EBD share hardware
fn ud_8435(model: &str) -> ModelProfile {
    ModelProfile {
        model: model.to_string(),
        fan: fans(&[(10, 6000.0, 8000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(VOLTAGE_LAYOUT, vec![on(11.5, 12.5), OFF, on(11.5, 12.5), OFF]),
        current: analog(CURRENT_LAYOUT, vec![on(37.5, 45.0), OFF, on(37.5, 45.0), OFF]),
        psu: psu(PSU_LAYOUT, &[0, 2]),
    }
}

fn md1420() -> ModelProfile {
    ModelProfile {
        model: "MD1420".to_string(),
        fan: fans(&[(4, 3000.0, 5000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(
            VOLTAGE_LAYOUT,
            vec![
                on(190.0, 255.0),
                on(190.0, 255.0),
                on(11.5, 12.5),
                on(11.5, 12.5),
                on(4.5, 5.5),
                on(4.5, 5.5),
            ],
        ),
        current: analog(
            CURRENT_LAYOUT,
            vec![
                on(0.25, 0.45),
                on(0.25, 0.45),
                on(3.0, 7.0),
                on(3.0, 7.0),
                on(0.0, 2.0),
                on(0.0, 2.0),
            ],
        ),
        psu: psu(PSU_LAYOUT, &[0, 1]),
    }
}

fn lenovo_2u12() -> ModelProfile {
    ModelProfile {
        model: "2U12ENCJ12ESM3P".to_string(),
        fan: fans(&[(4, 4500.0, 13000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(
            VOLTAGE_LAYOUT,
            vec![on(4.5, 5.5), on(11.5, 12.5), on(4.5, 5.5), on(11.5, 12.5)],
        ),
        current: analog(
            CURRENT_LAYOUT,
            current_minmax(&[0.40, 0.10, 0.40, 0.40], &[42.0, 38.0, 42.0, 38.0]),
        ),
        psu: psu(PSU_EXTENDED_LAYOUT, &[0, 1]),
    }
}

/// No voltage or current limits are known for this model
fn lenovo_d32845() -> ModelProfile {
    ModelProfile {
        model: "D32845U12GESM".to_string(),
        fan: fans(&[(10, 7000.0, 8000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(VOLTAGE_LAYOUT, Vec::new()),
        current: analog(CURRENT_LAYOUT, Vec::new()),
        psu: psu(PSU_LAYOUT, &[0, 1]),
    }
}

fn hgst_4u60() -> ModelProfile {
    ModelProfile {
        model: "4U60G2_STOR_ENCL".to_string(),
        fan: fans(&[(4, 2000.0, 5000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(
            VOLTAGE_LAYOUT,
            nominal(
                &[5.0, 12.0, 210.0, 5.0, 12.0, 210.0, 12.0, 12.0, 12.0, 12.0],
                RAIL_LOW_PCT,
                RAIL_HIGH_PCT,
            ),
        ),
        current: analog(
            HGST_CURRENT_LAYOUT,
            current_minmax(&[0.40, 0.10, 0.40, 0.40, 0.40, 0.10], &[16.0; 6]),
        ),
        psu: psu(PSU_LAYOUT, &[0, 1]),
    }
}

/// 210 V inputs tolerate 13.5 %, the 5 V/12 V rails use the rail defaults
fn hgst_h4060() -> ModelProfile {
    let mut voltage = nominal(
        &[210.0, 12.0, 210.0, 12.0, 5.0, 12.0, 5.0, 12.0],
        RAIL_LOW_PCT,
        RAIL_HIGH_PCT,
    );
    for input in [0, 2] {
        voltage[input] = Channel::Monitored(ThresholdBand::from_nominal(210.0, 0.135, 0.135));
    }

    ModelProfile {
        model: "H4060-J".to_string(),
        // Provisional; override with [[fan_override]] once real values are known
        fan: fans(&[(8, 4000.0, 21000.0)]),
        temperature: TEMPERATURE,
        voltage: analog(VOLTAGE_LAYOUT, voltage),
        current: analog(
            HGST_CURRENT_LAYOUT,
            current_minmax(
                &[0.40, 0.10, 0.40, 0.40, 0.40, 0.10, 0.40, 0.40],
                &[20.0, 40.0, 20.0, 40.0, 85.0, 38.0, 85.0, 38.0],
            ),
        ),
        psu: psu(PSU_LAYOUT, &[0, 1]),
    }
}

/// All built-in profiles
pub fn builtin_profiles() -> Vec<ModelProfile> {
    vec![
        sp_34106(),
        ud_8435("UD-8435-E6EBD"),
        md1420(),
        ud_8435("SP-3584-E12EBD"),
        lenovo_2u12(),
        lenovo_d32845(),
        hgst_4u60(),
        hgst_h4060(),
    ]
}
