use chrono::{DateTime, Local};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use yew::prelude::*;

/// Segment fill color. Regenerated whenever the item list changes, like the
/// rest of the wheel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Whether a black label reads better than a white one on this fill.
    pub fn is_bright(&self) -> bool {
        (self.r as u16 + self.g as u16 + self.b as u16) / 3 > 150
    }
}

pub fn random_colors(count: usize) -> Vec<Rgb> {
    let mut rng = SmallRng::from_entropy();
    (0..count)
        .map(|_| Rgb {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        })
        .collect()
}

/// Render a server timestamp in local time for the rewind banner.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(stamp) => stamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => "unknown time".to_string(),
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub message: String,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    if props.message.is_empty() {
        return html! {};
    }

    html! {
        <div class="mb-6 text-center">
            <p class="text-lg font-semibold text-gray-900 dark:text-white bg-gray-100 dark:bg-gray-700/40 px-4 py-3 rounded-lg">
                { &props.message }
            </p>
        </div>
    }
}
