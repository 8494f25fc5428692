//! Parser for the textual report printed by `mediainfo <file>`

use std::collections::HashMap;

/// Key/value view of a mediainfo report.
///
/// Keys are `<section>_<field>` in lower snake case, for example
/// `video_width` or `audio_sampling_rate`. A `#n` suffix on a section header
/// is dropped and the first value seen for a key wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaInfoReport {
    fields: HashMap<String, String>,
}

impl MediaInfoReport {
    /// Parse the report text
    pub fn parse(output: &str) -> Self {
        let mut fields = HashMap::new();
        let mut section = String::new();

        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match line.split_once(':') {
                None => section = normalize_section(line),
                Some((key, value)) => {
                    let key = format!("{}_{}", section, normalize_key(key));
                    fields
                        .entry(key)
                        .or_insert_with(|| value.trim().to_lowercase());
                }
            }
        }

        Self { fields }
    }

    /// Raw (lowercased) value of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Video width in pixels
    pub fn width(&self) -> Option<u32> {
        self.number("video_width").map(|v| v as u32)
    }

    /// Video height in pixels
    pub fn height(&self) -> Option<u32> {
        self.number("video_height").map(|v| v as u32)
    }

    /// Frames per second
    pub fn frame_rate(&self) -> Option<f64> {
        self.number("video_frame_rate")
            .or_else(|| self.number("video_original_frame_rate"))
    }

    /// Video bit rate in kb/s
    pub fn video_bitrate_kbps(&self) -> Option<u32> {
        self.bitrate_kbps("video_bit_rate")
    }

    /// Audio bit rate in kb/s
    pub fn audio_bitrate_kbps(&self) -> Option<u32> {
        self.bitrate_kbps("audio_bit_rate")
    }

    /// Audio sampling rate in Hz
    pub fn audio_sampling_hz(&self) -> Option<u32> {
        let raw = self.get("audio_sampling_rate")?;
        let value = leading_number(raw)?;
        let hz = if raw.contains("khz") { value * 1000.0 } else { value };
        Some(hz.round() as u32)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(leading_number)
    }

    fn bitrate_kbps(&self, key: &str) -> Option<u32> {
        let raw = self.get(key)?;
        let value = leading_number(raw)?;
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let kbps = if compact.contains("mb/s") || compact.contains("mbps") {
            value * 1000.0
        } else if compact.contains("kb/s") || compact.contains("kbps") {
            value
        } else {
            value / 1000.0
        };
        Some(kbps.round() as u32)
    }
}

fn normalize_section(header: &str) -> String {
    let name = header.split('#').next().unwrap_or(header);
    name.trim().to_lowercase().replace(' ', "_")
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

/// First number in a value, ignoring digit-grouping spaces (`1 920 pixels`)
fn leading_number(value: &str) -> Option<f64> {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok()
}
