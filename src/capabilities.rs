//! Optional features available in this build.

/// What the optional parts of the program can do, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Monthly posting frequency chart
    pub chart: bool,
    /// Half-block banner art
    pub art: bool,
}

impl Capabilities {
    /// Capabilities compiled into this binary.
    pub fn detect() -> Self {
        let caps = Self {
            chart: cfg!(feature = "chart"),
            art: cfg!(feature = "art"),
        };
        log::debug!("Detected capabilities: {:?}", caps);
        caps
    }

    /// Messages for every missing capability.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.chart {
            missing.push(
                "Chart rendering not available. Rebuild with `--features chart` to use trend analysis.",
            );
        }
        if !self.art {
            missing.push("Image support not available. Rebuild with `--features art` to display banner art.");
        }
        missing
    }
}
