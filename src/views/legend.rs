use crate::models::drug::DrugRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendRow {
    pub name: String,
    pub color: String,
    pub video_url: Option<String>,
}

pub fn legend_rows(registry: &DrugRegistry) -> Vec<LegendRow> {
    registry
        .iter()
        .map(|(name, info)| LegendRow {
            name: name.to_string(),
            color: info.color.clone(),
            video_url: info.video_url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::drug::DrugInfo;

    #[test]
    fn rows_follow_registry_order() {
        let registry = DrugRegistry::new()
            .with("Zeta", DrugInfo::new("red", "💊"))
            .with("Alpha", DrugInfo::new("blue", "💉").with_video("https://example.com/alpha"));
        let rows = legend_rows(&registry);
        assert_eq!(rows[0].name, "Zeta");
        assert_eq!(rows[0].video_url, None);
        assert_eq!(rows[1].name, "Alpha");
        assert_eq!(rows[1].video_url.as_deref(), Some("https://example.com/alpha"));
    }
}
