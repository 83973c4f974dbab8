//! Page layouts: which elements a page has and what they do.
//!
//! Geometry is not part of the layout; it comes from the surface at event
//! time. A layout only names elements and carries the data the page markup
//! would hold in attributes (counter targets, product names, categories).

use serde::{Deserialize, Serialize};

/// Direction decorative layers move relative to scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParallaxDirection {
    /// Layers drift up as the page scrolls down.
    Up,
    /// Layers drift down as the page scrolls down.
    #[default]
    Down,
}

/// How a counter moves from 0 to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// `floor(elapsed / duration * target)` each frame.
    #[default]
    Fraction,
    /// Add `target / (duration / 16ms)` each frame.
    Increment,
}

/// How a counter value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CounterStyle {
    /// `1234`
    #[default]
    Plain,
    /// `1.234` while running, `1.234+` when done.
    GroupedPlus,
    /// `1.234` while running, `99%` when done.
    Percent,
}

/// One animated number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub element: String,
    pub target: u64,
    pub duration_ms: u64,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub style: CounterStyle,
    /// Progress bar widened to `target%` when the counter starts.
    #[serde(default)]
    pub bar: Option<String>,
}

/// Counters that start together once `trigger` scrolls into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterGroup {
    pub trigger: String,
    #[serde(default)]
    pub start_delay_ms: u64,
    pub counters: Vec<CounterSpec>,
}

/// A product card in the catalogue grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub element: String,
    pub name: String,
    pub price: String,
    pub category: String,
}

/// Everything the engine needs to know about a page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub name: String,
    /// Section ids in document order.
    pub sections: Vec<String>,
    pub reveal: Vec<String>,
    pub counter_groups: Vec<CounterGroup>,
    pub parallax_layers: Vec<String>,
    pub parallax_direction: ParallaxDirection,
    pub fade_in: Vec<String>,
    pub headline_words: Vec<String>,
    pub products: Vec<ProductCard>,
    pub filters: Vec<String>,
    /// Lock body scrolling while the mobile menu is open.
    pub lock_scroll_with_menu: bool,
    /// Write the current year into the footer on load.
    pub footer_year: bool,
}

impl PageLayout {
    /// Look up a product card by element label.
    #[must_use]
    pub fn product(&self, element: &str) -> Option<&ProductCard> {
        self.products.iter().find(|p| p.element == element)
    }

    /// A built-in layout by name: `portfolio`, `phonehub` or `converter`.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "portfolio" => Some(Self::portfolio()),
            "phonehub" => Some(Self::phonehub()),
            "converter" => Some(Self::converter()),
            _ => None,
        }
    }

    /// The single-page portfolio site.
    #[must_use]
    pub fn portfolio() -> Self {
        let skill = |id: &str, percent: u64| CounterGroup {
            trigger: format!("skill-{id}"),
            start_delay_ms: 300,
            counters: vec![CounterSpec {
                element: format!("skill-{id}-percent"),
                target: percent,
                duration_ms: 1500,
                interpolation: Interpolation::Fraction,
                style: CounterStyle::Plain,
                bar: Some(format!("skill-{id}-progress")),
            }],
        };
        let stat = |id: &str, count: u64| CounterGroup {
            trigger: format!("stat-{id}"),
            start_delay_ms: 300,
            counters: vec![CounterSpec {
                element: format!("stat-{id}-number"),
                target: count,
                duration_ms: 2000,
                interpolation: Interpolation::Fraction,
                style: CounterStyle::Plain,
                bar: None,
            }],
        };

        let counter_groups = vec![
            skill("html", 95),
            skill("css", 90),
            skill("js", 85),
            stat("projects", 50),
            stat("clients", 30),
            stat("years", 5),
        ];
        let mut reveal = vec!["about-content".to_string()];
        reveal.extend(counter_groups.iter().map(|g| g.trigger.clone()));
        reveal.extend(["service-web", "service-ui", "service-seo"].map(String::from));

        Self {
            name: "portfolio".to_string(),
            sections: strings(&["home", "about", "skills", "services", "portfolio", "contact"]),
            reveal,
            counter_groups,
            parallax_layers: strings(&["floating-shape-1", "floating-shape-2", "floating-shape-3"]),
            parallax_direction: ParallaxDirection::Up,
            fade_in: strings(&["hero-greeting", "hero-headline", "hero-description", "hero-cta"]),
            headline_words: strings(&["Developer", "Designer"]),
            products: Vec::new(),
            filters: Vec::new(),
            lock_scroll_with_menu: false,
            footer_year: true,
        }
    }

    /// The PhoneHub shop template.
    #[must_use]
    pub fn phonehub() -> Self {
        let product = |element: &str, name: &str, price: &str, category: &str| ProductCard {
            element: element.to_string(),
            name: name.to_string(),
            price: price.to_string(),
            category: category.to_string(),
        };
        let stat = |element: &str, target: u64, style: CounterStyle| CounterSpec {
            element: element.to_string(),
            target,
            duration_ms: 2000,
            interpolation: Interpolation::Increment,
            style,
            bar: None,
        };

        Self {
            name: "phonehub".to_string(),
            sections: strings(&["home", "products", "features", "about", "contact"]),
            reveal: strings(&[
                "products-grid",
                "features-grid",
                "about-content",
                "contact-content",
            ]),
            counter_groups: vec![CounterGroup {
                trigger: "hero-stats".to_string(),
                start_delay_ms: 0,
                counters: vec![
                    stat("stat-customers", 50_000, CounterStyle::GroupedPlus),
                    stat("stat-products", 500, CounterStyle::GroupedPlus),
                    stat("stat-satisfaction", 99, CounterStyle::Percent),
                ],
            }],
            parallax_layers: strings(&["gradient-orb-1", "gradient-orb-2", "gradient-orb-3"]),
            parallax_direction: ParallaxDirection::Down,
            fade_in: Vec::new(),
            headline_words: Vec::new(),
            products: vec![
                product("iphone-15-pro", "iPhone 15 Pro Max", "29.990.000₫", "apple"),
                product("galaxy-s24", "Samsung Galaxy S24 Ultra", "27.990.000₫", "samsung"),
                product("xiaomi-14", "Xiaomi 14", "19.990.000₫", "xiaomi"),
                product("oppo-find-x7", "OPPO Find X7", "22.990.000₫", "oppo"),
            ],
            filters: strings(&["all", "apple", "samsung", "xiaomi", "oppo"]),
            lock_scroll_with_menu: true,
            footer_year: false,
        }
    }

    /// The single-form currency converter page.
    #[must_use]
    pub fn converter() -> Self {
        Self {
            name: "converter".to_string(),
            ..Self::default()
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_counters_are_revealable() {
        let layout = PageLayout::portfolio();
        for group in &layout.counter_groups {
            assert!(layout.reveal.contains(&group.trigger));
        }
    }

    #[test]
    fn test_phonehub_products_use_known_filters() {
        let layout = PageLayout::phonehub();
        for product in &layout.products {
            assert!(layout.filters.contains(&product.category));
        }
        assert_eq!(
            layout.product("xiaomi-14").map(|p| p.name.as_str()),
            Some("Xiaomi 14")
        );
        assert!(layout.product("nokia-3310").is_none());
    }

    #[test]
    fn test_presets_by_name() {
        assert_eq!(PageLayout::preset("phonehub"), Some(PageLayout::phonehub()));
        assert_eq!(PageLayout::preset("converter").unwrap().name, "converter");
        assert!(PageLayout::preset("blog").is_none());
    }

    #[test]
    fn test_layout_deserializes_with_defaults() {
        let layout: PageLayout = serde_json::from_str(
            r#"{
                "name": "mini",
                "sections": ["home"],
                "counter_groups": [{
                    "trigger": "stats",
                    "counters": [{"element": "n", "target": 10, "duration_ms": 100}]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(layout.name, "mini");
        assert_eq!(layout.counter_groups[0].start_delay_ms, 0);
        assert_eq!(
            layout.counter_groups[0].counters[0].interpolation,
            Interpolation::Fraction
        );
        assert!(layout.products.is_empty());
    }
}
