//! # TUI Components
//!
//! Stateless, props-based building blocks for the review screen. Each one is
//! created fresh every frame from `App` data and drawn through the
//! [`Component`](crate::tui::component::Component) trait.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── word_card.rs     (The flashcard: word, meaning, example)
//! └── stats_panel.rs   (List sizes sidebar)
//! ```

mod stats_panel;
mod title_bar;
mod word_card;

pub use stats_panel::StatsPanel;
pub use title_bar::TitleBar;
pub use word_card::WordCard;
