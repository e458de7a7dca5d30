//! Gateway region scanning — comment markers carve exempt regions.
//!
//! A gateway is the designated boundary where raw external input is
//! parsed and validated once; checks flagged `outside_gateway_only`
//! skip content inside these regions.

/// Line ranges (1-based, inclusive of the marker lines) delimited by
/// gateway start/end markers in one file.
#[derive(Debug, Clone, Default)]
pub struct GatewayRegions {
    ranges: Vec<(u32, u32)>,
}

impl GatewayRegions {
    /// Scan content for marker substrings. An unclosed start marker
    /// extends its region to the end of the file.
    pub fn scan(content: &str, start_marker: &str, end_marker: &str) -> Self {
        let mut ranges = Vec::new();
        let mut open: Option<u32> = None;
        let mut last_line = 0u32;

        for (i, line) in content.lines().enumerate() {
            let line_no = i as u32 + 1;
            last_line = line_no;
            match open {
                None => {
                    if line.contains(start_marker) {
                        open = Some(line_no);
                    }
                }
                Some(start) => {
                    if line.contains(end_marker) {
                        ranges.push((start, line_no));
                        open = None;
                    }
                }
            }
        }
        if let Some(start) = open {
            ranges.push((start, last_line.max(start)));
        }

        Self { ranges }
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| line >= start && line <= end)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
