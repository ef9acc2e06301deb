//! Agreement classification over model predictions.

/// How strongly the recorded model predictions agree with the answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consensus {
    Full,
    Majority { agreement: u32, total: u32 },
    None,
    Minority { agreement: u32, total: u32 },
}

impl Consensus {
    /// Classify `agreement` matching predictions out of `total` models.
    ///
    /// Checks run in order full, majority, none, minority; `0/0` is full.
    pub fn classify(agreement: u32, total: u32) -> Self {
        if agreement == total {
            Self::Full
        } else if agreement.saturating_mul(2) > total {
            Self::Majority { agreement, total }
        } else if agreement == 0 {
            Self::None
        } else {
            Self::Minority { agreement, total }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Full => "Full Consensus".to_string(),
            Self::Majority { agreement, total } => {
                format!("Majority Agreement ({}/{})", agreement, total)
            }
            Self::None => "No Agreement".to_string(),
            Self::Minority { agreement, total } => {
                format!("Minority Agreement ({}/{})", agreement, total)
            }
        }
    }

    /// Stable class name used by the HTML export and the GUI palette.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Full => "full-consensus",
            Self::Majority { .. } => "majority-agreement",
            Self::None => "no-agreement",
            Self::Minority { .. } => "minority-agreement",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Full => "✅",
            Self::Majority { .. } => "⚠️",
            Self::None => "❌",
            Self::Minority { .. } => "🔸",
        }
    }
}

/// Selector glyph for a list row's match ratio.
pub fn ratio_glyph(matching: u32, models: u32) -> &'static str {
    if models == 0 {
        return "⚪";
    }
    let ratio = matching as f64 / models as f64;
    if ratio >= 1.0 {
        "✅"
    } else if ratio >= 0.5 {
        "🟡"
    } else {
        "❌"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_four_models() {
        assert_eq!(Consensus::classify(4, 4).label(), "Full Consensus");
        assert_eq!(Consensus::classify(3, 4).label(), "Majority Agreement (3/4)");
        assert_eq!(Consensus::classify(0, 4).label(), "No Agreement");
        assert_eq!(Consensus::classify(1, 4).label(), "Minority Agreement (1/4)");
        assert_eq!(Consensus::classify(2, 4).css_class(), "minority-agreement");
    }

    #[test]
    fn classify_without_models_is_full() {
        assert_eq!(Consensus::classify(0, 0), Consensus::Full);
        assert_eq!(Consensus::classify(0, 0).glyph(), "✅");
    }

    #[test]
    fn ratio_glyph_thresholds() {
        assert_eq!(ratio_glyph(0, 0), "⚪");
        assert_eq!(ratio_glyph(4, 4), "✅");
        assert_eq!(ratio_glyph(2, 4), "🟡");
        assert_eq!(ratio_glyph(1, 4), "❌");
    }
}
