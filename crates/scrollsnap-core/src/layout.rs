//! In-memory viewport over vertically stacked sections
//!
//! Used by the terminal host as its layout model and by tests as a fake
//! adapter. Sections are addressed by index.

use crate::snap::{ElementRect, Listener, Mark, Viewport, ViewportMetrics};

#[derive(Debug, Clone, Default)]
pub struct StackedViewport {
    width: f64,
    height: f64,
    /// Height of each section, top to bottom
    sections: Vec<f64>,
    scroll_top: f64,
    marks: Vec<Mark>,
    listeners: Vec<Listener>,
    /// Total number of `listen` calls received
    registrations: usize,
    user_agent: Option<String>,
}

impl StackedViewport {
    pub fn new(width: f64, height: f64, sections: Vec<f64>) -> Self {
        let marks = vec![Mark::default(); sections.len()];
        Self {
            width,
            height,
            sections,
            marks,
            ..Default::default()
        }
    }

    /// `count` sections of equal height
    pub fn uniform(width: f64, height: f64, section_height: f64, count: usize) -> Self {
        Self::new(width, height, vec![section_height; count])
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Change the viewport size, keeping the scroll offset in range
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_top());
    }

    /// Replace section heights; marks of surviving sections are kept
    pub fn set_section_heights(&mut self, sections: Vec<f64>) {
        self.marks.resize(sections.len(), Mark::default());
        self.sections = sections;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_top());
    }

    /// Native scrolling, as a wheel would do without snapping
    pub fn scroll_by(&mut self, delta: f64) {
        let top = self.scroll_top + delta;
        self.set_scroll_top(top);
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section_height(&self, index: usize) -> Option<f64> {
        self.sections.get(index).copied()
    }

    /// Offset of a section's top edge from the top of the content
    pub fn section_top(&self, index: usize) -> Option<f64> {
        if index >= self.sections.len() {
            return None;
        }
        Some(self.sections[..index].iter().sum())
    }

    pub fn content_height(&self) -> f64 {
        self.sections.iter().sum()
    }

    /// Largest scroll offset; zero when everything fits
    pub fn max_top(&self) -> f64 {
        (self.content_height() - self.height).max(0.0)
    }

    pub fn mark_of(&self, index: usize) -> Option<Mark> {
        self.marks.get(index).copied()
    }

    /// Indices of sections currently marked active
    pub fn active_sections(&self) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, mark)| **mark == Mark::Active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn registrations(&self) -> usize {
        self.registrations
    }
}

impl Viewport for StackedViewport {
    type Element = usize;

    fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics::new(self.scroll_top, self.width, self.height, self.content_height())
    }

    fn element_rect(&self, element: &usize) -> Option<ElementRect> {
        Some(ElementRect {
            top: self.section_top(*element)?,
            height: self.section_height(*element)?,
        })
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = if top.is_nan() {
            0.0
        } else {
            top.clamp(0.0, self.max_top())
        };
    }

    fn mark(&mut self, element: &usize, mark: Mark) {
        if let Some(slot) = self.marks.get_mut(*element) {
            *slot = mark;
        }
    }

    fn listen(&mut self, listener: Listener) {
        self.registrations += 1;
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    fn unlisten(&mut self, listener: Listener) {
        self.listeners.retain(|l| *l != listener);
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}
