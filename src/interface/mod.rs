pub mod prompts;
pub mod render;

pub use prompts::{prompt_margin, prompt_purchase, prompt_recipe, prompt_yes_no};
pub use render::{
    display_calculation, display_conversion, display_history, display_recipes,
    display_running_total,
};
