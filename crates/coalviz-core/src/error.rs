// File: crates/coalviz-core/src/error.rs
// Summary: Error taxonomy for chart builds and the host-facing signal each error maps to.

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// The active selection matched no rows.
    #[error("no data for current selection: {0}")]
    NoData(String),

    /// The raster backend is missing or failed; the interactive scene stays usable.
    #[error("raster export unavailable: {0}")]
    ExportUnavailable(String),

    #[error("invalid observation: {0}")]
    InvalidObservation(String),

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// How a host should surface an error to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostSignal {
    /// Informational message; hide or disable export.
    NoData,
    /// Show a disabled export affordance with a remediation hint.
    ExportUnavailable,
    /// Report the full failure for this render cycle.
    Fatal,
}

impl ChartError {
    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    pub fn export_unavailable(msg: impl Into<String>) -> Self {
        Self::ExportUnavailable(msg.into())
    }

    pub fn invalid_observation(msg: impl Into<String>) -> Self {
        Self::InvalidObservation(msg.into())
    }

    pub fn invalid_palette(msg: impl Into<String>) -> Self {
        Self::InvalidPalette(msg.into())
    }

    pub fn signal(&self) -> HostSignal {
        match self {
            Self::NoData(_) => HostSignal::NoData,
            Self::ExportUnavailable(_) => HostSignal::ExportUnavailable,
            Self::InvalidObservation(_) | Self::InvalidPalette(_) | Self::Other(_) => {
                HostSignal::Fatal
            }
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(ChartError::no_data("x").to_string().contains("no data for current selection:"));
        assert!(ChartError::export_unavailable("x")
            .to_string()
            .contains("raster export unavailable:"));
        assert!(ChartError::invalid_observation("x")
            .to_string()
            .contains("invalid observation:"));
        assert!(ChartError::invalid_palette("x").to_string().contains("invalid palette:"));
    }

    #[test]
    fn signals_follow_taxonomy() {
        assert_eq!(ChartError::no_data("x").signal(), HostSignal::NoData);
        assert_eq!(ChartError::export_unavailable("x").signal(), HostSignal::ExportUnavailable);
        assert_eq!(ChartError::invalid_observation("x").signal(), HostSignal::Fatal);
        let other = ChartError::Other(anyhow::anyhow!("boom"));
        assert_eq!(other.signal(), HostSignal::Fatal);
        assert!(other.to_string().contains("boom"));
    }
}
