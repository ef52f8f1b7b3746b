use std::{env, path::PathBuf};

/// Order in which the two input sources are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourcePrecedence {
    #[default]
    StoreFirst,
    PanelFirst,
}

/// Which transformer output feeds the chart: the 12 discrete windows or the
/// smoothed 61-slot per-minute profile. The two are alternatives, never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartProfile {
    #[default]
    Discrete,
    Smooth,
}

impl ChartProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "discrete" => Some(Self::Discrete),
            "smooth" => Some(Self::Smooth),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_path: PathBuf,
    pub panel_path: PathBuf,
    pub precedence: SourcePrecedence,
    pub profile: ChartProfile,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let store_path = env::var("MOMENTUM_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/store.json"));

        let panel_path = env::var("MOMENTUM_PANEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/panel.json"));

        let precedence = match env::var("MOMENTUM_SOURCE_ORDER").as_deref() {
            Ok("panel-first") => SourcePrecedence::PanelFirst,
            _ => SourcePrecedence::StoreFirst,
        };

        let profile = env::var("MOMENTUM_PROFILE")
            .ok()
            .and_then(|value| ChartProfile::parse(&value))
            .unwrap_or_default();

        Self {
            port,
            store_path,
            panel_path,
            precedence,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_known_values() {
        assert_eq!(ChartProfile::parse("discrete"), Some(ChartProfile::Discrete));
        assert_eq!(ChartProfile::parse("smooth"), Some(ChartProfile::Smooth));
        assert_eq!(ChartProfile::parse("spline"), None);
    }
}
