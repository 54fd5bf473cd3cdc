/// Color used for medications the registry does not know.
pub const FALLBACK_COLOR: &str = "#ccc";
/// Icon shown on a medication card for an unknown medication.
pub const FALLBACK_ICON: &str = "❓";
/// Icon used in compact previews (calendar cells, reminders) for an unknown medication.
pub const PREVIEW_FALLBACK_ICON: &str = "💊";

const PILL: &str = "💊";
const INJECTION: &str = "💉";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrugInfo {
    pub color: String,
    pub icon: String,
    pub video_url: Option<String>,
}

impl DrugInfo {
    pub fn new(color: &str, icon: &str) -> Self {
        Self {
            color: color.to_string(),
            icon: icon.to_string(),
            video_url: None,
        }
    }

    pub fn with_video(mut self, url: &str) -> Self {
        self.video_url = Some(url.to_string());
        self
    }

    fn fallback() -> Self {
        Self::new(FALLBACK_COLOR, FALLBACK_ICON)
    }
}

/// Ordered medication name -> presentation lookup.
///
/// Definition order is preserved so the legend lists medications the way the
/// registry declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrugRegistry {
    entries: Vec<(String, DrugInfo)>,
}

impl DrugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry; a replaced entry keeps its position.
    pub fn with(mut self, name: &str, info: DrugInfo) -> Self {
        self.insert(name, info);
        self
    }

    pub fn insert(&mut self, name: &str, info: DrugInfo) {
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = info,
            None => self.entries.push((name.to_string(), info)),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&DrugInfo> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, info)| info)
    }

    /// Presentation for a medication card; unknown names get the neutral fallback.
    pub fn resolve(&self, name: &str) -> DrugInfo {
        self.lookup(name).cloned().unwrap_or_else(DrugInfo::fallback)
    }

    pub fn preview_icon(&self, name: &str) -> &str {
        self.lookup(name)
            .map(|info| info.icon.as_str())
            .unwrap_or(PREVIEW_FALLBACK_ICON)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DrugInfo)> {
        self.entries.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fertility-treatment medications the viewer ships with.
    pub fn builtin() -> Self {
        Self::new()
            .with("Prenatal Vitamins", DrugInfo::new("var(--color-prenatal)", PILL))
            .with(
                "Omnitrope",
                DrugInfo::new("var(--color-omnitrope)", INJECTION)
                    .with_video("https://www.youtube.com/watch?v=NS0ca3T7wRM"),
            )
            .with("Norethindrone", DrugInfo::new("var(--color-norethindrone)", PILL))
            .with("Estradiol", DrugInfo::new("var(--color-estradiol)", PILL))
            .with("Clomid", DrugInfo::new("var(--color-clomid)", PILL))
            .with(
                "Follistim",
                DrugInfo::new("var(--color-follistim)", INJECTION)
                    .with_video("https://www.youtube.com/watch?v=0iz5zu13Gnk"),
            )
            .with(
                "Menopur",
                DrugInfo::new("var(--color-menopur)", INJECTION)
                    .with_video("https://www.youtube.com/watch?v=HBrRpb436A0"),
            )
            .with(
                "Ganirelix",
                DrugInfo::new("var(--color-ganirelix)", INJECTION)
                    .with_video("https://www.youtube.com/watch?v=m1pDSK-1pHM"),
            )
            .with(
                "Pregnyl",
                DrugInfo::new("var(--color-pregnyl)", INJECTION)
                    .with_video("https://www.youtube.com/watch?v=seXGpX_uFBg"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_keeps_definition_order() {
        let registry = DrugRegistry::builtin();
        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names.first(), Some(&"Prenatal Vitamins"));
        assert_eq!(names.last(), Some(&"Pregnyl"));
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn resolve_unknown_uses_fallback() {
        let registry = DrugRegistry::builtin();
        let info = registry.resolve("Aspirin");
        assert_eq!(info.color, FALLBACK_COLOR);
        assert_eq!(info.icon, FALLBACK_ICON);
        assert_eq!(info.video_url, None);
        assert_eq!(registry.preview_icon("Aspirin"), PREVIEW_FALLBACK_ICON);
    }

    #[test]
    fn insert_replaces_in_place() {
        let registry = DrugRegistry::new()
            .with("A", DrugInfo::new("red", "1"))
            .with("B", DrugInfo::new("blue", "2"))
            .with("A", DrugInfo::new("green", "3"));
        let entries: Vec<(&str, &str)> = registry
            .iter()
            .map(|(name, info)| (name, info.color.as_str()))
            .collect();
        assert_eq!(entries, vec![("A", "green"), ("B", "blue")]);
    }

    #[test]
    fn injectables_carry_video_links() {
        let registry = DrugRegistry::builtin();
        assert!(registry.lookup("Menopur").unwrap().video_url.is_some());
        assert!(registry.lookup("Clomid").unwrap().video_url.is_none());
    }
}
