//! Fuzzy correspondence between design components and page elements.
//!
//! There are no shared identifiers across the two trees, so each candidate is
//! scored over the signal channels both sides can provide. A channel missing on
//! either side is skipped and the remaining weights are renormalized.

use std::sync::Arc;

use crate::config::{MatchingConfig, StrategyKind};
use crate::error::DqaError;
use crate::types::{ComponentType, DesignComponent, ImplementationElement};
use crate::Result;

use super::color::{design_color_to_rgb, parse_css_color, CssColor, Rgb};
use super::similarity::{
    color_similarity, geometry_similarity, position_similarity, text_similarity,
};

/// Partial credit when an element's tag is not in the component type's set.
pub const TYPE_MISMATCH_CREDIT: f64 = 0.3;

/// Best-scoring element for a component.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub index: usize,
    pub element: &'a ImplementationElement,
    pub score: f64,
}

/// Scores a (component, element) pair in `[0, 1]`.
pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, component: &DesignComponent, element: &ImplementationElement) -> Result<f64>;
}

/// Builds the strategy selected in config.
pub fn strategy_for(kind: StrategyKind) -> Arc<dyn ScoringStrategy> {
    match kind {
        StrategyKind::Weighted => Arc::new(WeightedScorer::default()),
        StrategyKind::Spatial => Arc::new(SpatialScorer::default()),
    }
}

#[derive(Clone)]
pub struct Matcher {
    strategy: Arc<dyn ScoringStrategy>,
    acceptance_threshold: f64,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("strategy", &self.strategy.name())
            .field("acceptance_threshold", &self.acceptance_threshold)
            .finish()
    }
}

impl Matcher {
    pub fn new(strategy: Arc<dyn ScoringStrategy>, acceptance_threshold: f64) -> Self {
        Self {
            strategy,
            acceptance_threshold,
        }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(strategy_for(config.strategy), config.acceptance_threshold)
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Highest-scoring element strictly above the acceptance threshold.
    ///
    /// Ties keep the earliest candidate. Elements are not reserved, so the
    /// same element may win for several components.
    pub fn find_match<'a>(
        &self,
        component: &DesignComponent,
        elements: &'a [ImplementationElement],
    ) -> Result<Option<MatchCandidate<'a>>> {
        let mut best: Option<MatchCandidate<'a>> = None;

        for (index, element) in elements.iter().enumerate() {
            let score = self.strategy.score(component, element)?;
            if !score.is_finite() {
                return Err(DqaError::component(
                    &component.id,
                    format!(
                        "{} strategy produced a non-finite score for element {}",
                        self.strategy.name(),
                        index
                    ),
                ));
            }
            if best.is_none_or(|b| score > b.score) {
                best = Some(MatchCandidate {
                    index,
                    element,
                    score,
                });
            }
        }

        Ok(best.filter(|candidate| candidate.score > self.acceptance_threshold))
    }
}

/// Channel weights for [`WeightedScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    pub name: f64,
    pub element_type: f64,
    pub geometry: f64,
    pub color: f64,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self {
            name: 0.3,
            element_type: 0.2,
            geometry: 0.3,
            color: 0.2,
        }
    }
}

/// Name, type, geometry and color channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScorer {
    pub weights: ChannelWeights,
}

impl WeightedScorer {
    fn channels(
        &self,
        component: &DesignComponent,
        element: &ImplementationElement,
    ) -> Vec<(f64, f64)> {
        let mut applied = Vec::with_capacity(4);

        if let Some(value) = name_channel(component, element) {
            applied.push((self.weights.name, value));
        }
        if let Some(value) = type_channel(component, element) {
            applied.push((self.weights.element_type, value));
        }
        if let (Some(design), Some(rect)) = (&component.dimensions, &element.bounding_rect) {
            applied.push((self.weights.geometry, geometry_similarity(design, rect)));
        }
        if let (Some(design), Some(actual)) =
            (design_match_color(component), element_match_color(component, element))
        {
            applied.push((self.weights.color, color_similarity(design, actual)));
        }

        applied
    }
}

impl ScoringStrategy for WeightedScorer {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn score(&self, component: &DesignComponent, element: &ImplementationElement) -> Result<f64> {
        Ok(weighted_average(&self.channels(component, element)))
    }
}

/// [`WeightedScorer`] channels plus centre-point proximity.
#[derive(Debug, Clone, Copy)]
pub struct SpatialScorer {
    pub base: WeightedScorer,
    pub position_weight: f64,
}

impl Default for SpatialScorer {
    fn default() -> Self {
        Self {
            base: WeightedScorer::default(),
            position_weight: 0.2,
        }
    }
}

impl ScoringStrategy for SpatialScorer {
    fn name(&self) -> &'static str {
        "spatial"
    }

    fn score(&self, component: &DesignComponent, element: &ImplementationElement) -> Result<f64> {
        let mut applied = self.base.channels(component, element);
        if let (Some(design), Some(rect)) = (&component.dimensions, &element.bounding_rect) {
            applied.push((self.position_weight, position_similarity(design, rect)));
        }
        Ok(weighted_average(&applied))
    }
}

/// Sum of weighted values over the sum of applied weights (0 when none apply).
pub fn weighted_average(applied: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = applied.iter().map(|(w, _)| *w).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    applied.iter().map(|(w, v)| w * v).sum::<f64>() / total_weight
}

fn name_channel(component: &DesignComponent, element: &ImplementationElement) -> Option<f64> {
    let name = component.name.trim();
    let text = element.text.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() || text.is_empty() {
        return None;
    }
    Some(text_similarity(name, text))
}

fn type_channel(component: &DesignComponent, element: &ImplementationElement) -> Option<f64> {
    let tag = element.tag()?;
    let accepted = acceptable_tags(&component.component_type);
    Some(if accepted.contains(&tag.as_str()) {
        1.0
    } else {
        TYPE_MISMATCH_CREDIT
    })
}

/// Tags that plausibly render a given design node type.
pub fn acceptable_tags(component_type: &ComponentType) -> &'static [&'static str] {
    match component_type {
        ComponentType::Text => &[
            "p", "span", "h1", "h2", "h3", "h4", "h5", "h6", "label", "a", "strong", "em", "li",
        ],
        ComponentType::Frame | ComponentType::Group => &[
            "div", "section", "header", "footer", "main", "nav", "article", "aside", "form", "ul",
            "ol",
        ],
        ComponentType::Rectangle => &["div", "button", "section", "span", "hr", "img"],
        ComponentType::Ellipse => &["div", "span", "img", "svg"],
        ComponentType::Vector => &["svg", "path", "img"],
        ComponentType::Instance | ComponentType::Component => &[
            "div", "button", "a", "input", "section", "nav", "header", "footer",
        ],
        ComponentType::Other(_) => &[],
    }
}

fn design_match_color(component: &DesignComponent) -> Option<Rgb> {
    component.fill_color().map(design_color_to_rgb)
}

/// Text nodes are filled with their glyph color; other nodes with a background.
fn element_match_color(component: &DesignComponent, element: &ImplementationElement) -> Option<Rgb> {
    let raw = if component.is_text() {
        element.styles.color.as_deref()
    } else {
        element.styles.background_color.as_deref()
    }?;
    match parse_css_color(raw)? {
        CssColor::Rgb(rgb) => Some(rgb),
        CssColor::Transparent => None,
    }
}
