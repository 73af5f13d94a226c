mod history;
mod library;
mod persistence;
mod session;

pub use history::{HistoryStore, HISTORY_KEY};
pub use library::{require_recipe, RecipeLibrary, USER_RECIPES_KEY};
pub use persistence::{
    load_list, load_list_for_update, now_millis, save_list, FileStore, KeyValueStore, MemoryStore,
};
pub use session::CalculatorSession;
