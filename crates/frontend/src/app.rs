use crate::shared::config::load_config;
use crate::shared::{filter_persistence, form_validation, table_search, theme};

/// Attaches every page behaviour once the document is parsed.
/// Each one is a no-op on pages without its elements.
pub fn start() {
    crate::shared::dom::on_ready(|| {
        let config = load_config();

        theme::init(&config.theme);
        // numeric fields are normalized before the filter snapshot is taken
        form_validation::init(&config.validation);
        filter_persistence::init(&config.filter_persistence);
        table_search::init(&config.search);
    });
}
