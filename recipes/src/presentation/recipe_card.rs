//! View model for a recipe card.

use crate::domain::Recipe;

/// Label of the save action button.
pub const SAVE_LABEL: &str = "Save recipe";
/// Label of the delete action button.
pub const DELETE_LABEL: &str = "Delete recipe";

/// Which card actions the host screen wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardActions {
    /// Render the action row at all.
    pub show_actions: bool,
    /// The host handles "save".
    pub can_save: bool,
    /// The host handles "delete".
    pub can_delete: bool,
}

impl Default for CardActions {
    fn default() -> Self {
        Self {
            show_actions: true,
            can_save: false,
            can_delete: false,
        }
    }
}

/// An action button rendered at the bottom of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Save the recipe to the user's list.
    Save,
    /// Remove the recipe from the user's list.
    Delete,
}

impl CardAction {
    /// Button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Save => SAVE_LABEL,
            Self::Delete => DELETE_LABEL,
        }
    }
}

/// Display-ready card content.
///
/// # Examples
/// ```
/// use recipes::domain::{Recipe, RecipeId};
/// use recipes::presentation::{CardActions, RecipeCardView};
///
/// let recipe = Recipe {
///     id: RecipeId::new("com-tam").unwrap(),
///     name: "Com tam".to_owned(),
///     region: "Southern Vietnam".to_owned(),
///     image: "https://images.example/com-tam.jpg".to_owned(),
///     ingredients: vec!["Broken rice".to_owned()],
///     instructions: vec!["Grill the pork".to_owned()],
/// };
/// let card = RecipeCardView::from_recipe(&recipe, CardActions::default());
/// assert_eq!(card.region_line, "Region: Southern Vietnam");
/// assert_eq!(card.ingredient_lines, vec!["• Broken rice"]);
/// assert_eq!(card.instruction_lines, vec!["1. Grill the pork"]);
/// assert!(card.actions.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCardView {
    /// Dish name.
    pub title: String,
    /// Image reference passed through to the image loader.
    pub image: String,
    /// `Region: {label}` line.
    pub region_line: String,
    /// Bulleted ingredient lines.
    pub ingredient_lines: Vec<String>,
    /// Numbered instruction lines, starting at 1.
    pub instruction_lines: Vec<String>,
    /// Action buttons in display order.
    pub actions: Vec<CardAction>,
}

impl RecipeCardView {
    /// Section heading above the ingredients.
    pub const INGREDIENTS_HEADING: &'static str = "Ingredients:";
    /// Section heading above the instructions.
    pub const INSTRUCTIONS_HEADING: &'static str = "Instructions:";

    /// Build the card for `recipe`.
    pub fn from_recipe(recipe: &Recipe, actions: CardActions) -> Self {
        let ingredient_lines = recipe
            .ingredients
            .iter()
            .map(|ingredient| format!("• {ingredient}"))
            .collect();
        let instruction_lines = recipe
            .instructions
            .iter()
            .enumerate()
            .map(|(index, step)| format!("{}. {step}", index + 1))
            .collect();

        let mut buttons = Vec::new();
        if actions.show_actions {
            if actions.can_save {
                buttons.push(CardAction::Save);
            }
            if actions.can_delete {
                buttons.push(CardAction::Delete);
            }
        }

        Self {
            title: recipe.name.clone(),
            image: recipe.image.clone(),
            region_line: format!("Region: {}", recipe.region),
            ingredient_lines,
            instruction_lines,
            actions: buttons,
        }
    }
}
