//! Reducer - maps actions onto the state's named transitions

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.begin_loading();
            DispatchResult::changed_with(Effect::LoadLibrary {
                sources: state.sources().clone(),
            })
        }

        Action::LibraryDidLoad(library) => {
            state.load_library(library);
            DispatchResult::changed()
        }

        Action::LibraryDidError(error) => {
            state.fail_library(error);
            DispatchResult::changed()
        }

        // ===== Language =====
        Action::LanguageSet(language) => changed_if(state.set_language(&language)),

        Action::LanguageCycle => {
            let next = state
                .library()
                .and_then(|library| library.translations().next_language(state.language()))
                .map(str::to_string);
            match next {
                Some(language) => changed_if(state.set_language(&language)),
                None => DispatchResult::unchanged(),
            }
        }

        // ===== Route =====
        Action::RouteSet(route) => changed_if(state.set_route(route)),

        Action::RouteNext => {
            let next = state.route().next();
            changed_if(state.set_route(next))
        }

        // ===== Search =====
        Action::SearchOpen => changed_if(state.open_search()),

        Action::SearchClose => changed_if(state.close_search()),

        Action::SearchChange(term) => changed_if(state.set_search(term)),

        // ===== Filter / focus =====
        Action::FilterSet(update) => changed_if(state.set_filter(update)),

        Action::FocusSelect(id) => changed_if(state.set_focus(&id)),

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}
