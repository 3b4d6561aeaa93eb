use std::str::FromStr;

/// Lifecycle stage at which a policy evaluation is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Develop,
    Source,
    Build,
    StageRelease,
    Release,
    Operate,
}

impl Stage {
    /// Stage identifier understood by the policy engine
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Develop => "develop",
            Stage::Source => "source",
            Stage::Build => "build",
            Stage::StageRelease => "stage-release",
            Stage::Release => "release",
            Stage::Operate => "operate",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "develop" => Ok(Stage::Develop),
            "source" => Ok(Stage::Source),
            "build" => Ok(Stage::Build),
            "stage-release" => Ok(Stage::StageRelease),
            "release" => Ok(Stage::Release),
            "operate" => Ok(Stage::Operate),
            _ => Err(format!("Unknown policy stage: {}", s)),
        }
    }
}
