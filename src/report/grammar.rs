//! Line grammars for `sg_ses` and `lsscsi` output
//!
//! Each matcher recognises one line shape and returns the typed fields, or
//! `None` when the line has a different shape. Matching is anchored at the
//! start of the line unless noted otherwise.

/// Minimal scanner over a line
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn literal(&mut self, lit: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(lit)?;
        Some(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn take_while1(&mut self, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let taken = self.take_while(pred);
        (!taken.is_empty()).then_some(taken)
    }

    fn digits(&mut self) -> Option<&'a str> {
        self.take_while1(|c| c.is_ascii_digit())
    }

    fn unsigned<T: std::str::FromStr>(&mut self) -> Option<T> {
        self.digits()?.parse().ok()
    }

    fn signed(&mut self) -> Option<i32> {
        let negative = self.literal("-").is_some();
        let value: i32 = self.unsigned()?;
        Some(if negative { -value } else { value })
    }

    fn whitespace1(&mut self) -> Option<()> {
        self.take_while1(char::is_whitespace).map(|_| ())
    }

    /// Exactly `n` word characters (`[A-Za-z0-9_]`)
    fn word_chars(&mut self, n: usize) -> Option<&'a str> {
        let end = self
            .rest
            .char_indices()
            .take(n)
            .try_fold(0, |_, (i, c)| is_word(c).then_some(i + c.len_utf8()))?;
        if self.rest[..end].chars().count() != n {
            return None;
        }
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(taken)
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `    Element type: <name>, subenclosure id: ...`
///
/// Exactly four whitespace characters of indentation. The name runs up to the
/// last comma on the line.
pub fn section_header(line: &str) -> Option<&str> {
    let mut indent = line.char_indices();
    let mut start = 0;
    for _ in 0..4 {
        let (i, c) = indent.next()?;
        if !c.is_whitespace() {
            return None;
        }
        start = i + c.len_utf8();
    }
    let rest = line[start..].strip_prefix("Element type: ")?;
    let comma = rest.rfind(',')?;
    Some(&rest[..comma])
}

/// `Element <n> descriptor:`; the index is the second token
pub fn element_index(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

/// Text after the last `status: ` on the line
pub fn status_text(line: &str) -> Option<&str> {
    const MARKER: &str = "status: ";
    line.rfind(MARKER).map(|i| &line[i + MARKER.len()..])
}

/// `... Actual speed=<n> rpm ...` (unanchored)
pub fn actual_speed(line: &str) -> Option<u32> {
    line.match_indices("Actual speed=").find_map(|(i, _)| {
        let mut cur = Cursor::new(&line[i..]);
        cur.literal("Actual speed=")?;
        let rpm = cur.unsigned()?;
        cur.literal(" rpm")?;
        Some(rpm)
    })
}

/// `Temperature=<n> C`
pub fn temperature(line: &str) -> Option<i32> {
    let mut cur = Cursor::new(line);
    cur.literal("Temperature=")?;
    let celsius = cur.signed()?;
    cur.literal(" C")?;
    Some(celsius)
}

/// `high critical=<n>, high warning=<n>` as (critical, warning)
pub fn high_limits(line: &str) -> Option<(i32, i32)> {
    let mut cur = Cursor::new(line);
    cur.literal("high critical=")?;
    let critical = cur.signed()?;
    cur.literal(", high warning=")?;
    let warning = cur.signed()?;
    Some((critical, warning))
}

/// `low warning=<n>, low critical=<n>` as (warning, critical)
pub fn low_limits(line: &str) -> Option<(i32, i32)> {
    let mut cur = Cursor::new(line);
    cur.literal("low warning=")?;
    let warning = cur.signed()?;
    cur.literal(", low critical=")?;
    let critical = cur.signed()?;
    Some((warning, critical))
}

/// `<label>: <x> <unit>`; `x` runs up to the last ` <unit>` on the line
fn analog_reading(line: &str, label: &str, unit: &str) -> Option<f64> {
    let rest = line.strip_prefix(label)?.strip_prefix(": ")?;
    let end = rest.rfind(unit).filter(|&i| rest[..i].ends_with(' '))?;
    rest[..end - 1].trim().parse().ok()
}

/// `Voltage: <x> volts`
pub fn voltage(line: &str) -> Option<f64> {
    analog_reading(line, "Voltage", "volts")
}

/// `Current: <x> amps`
pub fn current(line: &str) -> Option<f64> {
    analog_reading(line, "Current", "amps")
}

/// `  Vendor specific element type, status in hex: xx xx xx YY`
///
/// `YY` is the front-panel enclosure ID in hex.
pub fn front_panel_id(line: &str) -> Option<u8> {
    let mut cur = Cursor::new(line);
    cur.whitespace1()?;
    cur.literal("Vendor specific element type, status in hex: ")?;
    for _ in 0..3 {
        cur.word_chars(2)?;
        cur.literal(" ")?;
    }
    u8::from_str_radix(cur.word_chars(2)?, 16).ok()
}

/// `  Primary enclosure logical identifier (hex): <hex>`
pub fn logical_identifier(line: &str) -> Option<&str> {
    let mut cur = Cursor::new(line);
    cur.whitespace1()?;
    cur.literal("Primary enclosure logical identifier (hex): ")?;
    cur.take_while1(|c| c.is_ascii_hexdigit())
}

/// One `lsscsi -g` enclosure line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScsiEnclosure<'a> {
    pub model: &'a str,
    /// Generic device name, e.g. `sg12`
    pub sg_name: &'a str,
}

/// `[h:c:t:l]  enclosu <vendor> <model> ... /dev/sg<n>`
pub fn scsi_enclosure(line: &str) -> Option<ScsiEnclosure<'_>> {
    let mut cur = Cursor::new(line);
    cur.literal("[")?;
    for sep in [":", ":", ":", "]"] {
        cur.digits()?;
        cur.literal(sep)?;
    }
    cur.whitespace1()?;
    cur.literal("enclosu ")?;
    cur.take_while1(is_word)?;
    cur.whitespace1()?;
    let model = cur.take_while1(|c| is_word(c) || c == '-')?;

    let tail = cur.rest;
    let sg_name = tail.rmatch_indices("/dev/sg").find_map(|(i, _)| {
        let name = &tail[i + "/dev/".len()..];
        let digits = name["sg".len()..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(name.len() - "sg".len());
        (digits > 0).then(|| &name[..2 + digits])
    })?;

    Some(ScsiEnclosure { model, sg_name })
}
