//! Display-ready view models consumed by the screens.
//!
//! Nothing here performs I/O except the profile screen actions, which go
//! through the domain services.

mod profile;
mod recipe_card;
mod reviews;

pub use profile::{
    FieldRender, FormField, Notice, NoticeKind, ProfileButton, ProfileForm, ProfileRender,
    ProfileScreen, ProfileView, render,
};
pub use recipe_card::{CardAction, CardActions, DELETE_LABEL, RecipeCardView, SAVE_LABEL};
pub use reviews::{
    ReviewItemView, ReviewListView, ReviewSummaryView, STAR_COUNT, StarState, star_row,
};
