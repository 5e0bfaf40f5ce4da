//! Search box and filter selects shared by the list views

use crate::catalog::Position;
use crate::i18n::Texts;
use crate::selection;
use crate::state::Snapshot;

use super::{Control, FilterBinding, Node, SelectOption};

pub fn search_box(texts: &Texts<'_>) -> Control {
    Control::Search {
        placeholder: texts.or("search_placeholder", "Search..."),
    }
}

pub fn position_select(texts: &Texts<'_>) -> Control {
    let mut options = vec![SelectOption {
        key: None,
        label: texts.or("filter_all_pos", "All Pos"),
    }];
    options.extend(Position::ALL.iter().map(|position| SelectOption {
        key: Some(position.code().to_string()),
        label: position.code().to_string(),
    }));
    Control::Select {
        binding: FilterBinding::Position,
        options,
    }
}

pub fn grade_select(snapshot: &Snapshot<'_>, texts: &Texts<'_>) -> Control {
    let mut options = vec![SelectOption {
        key: None,
        label: texts.or("filter_all_grades", "All Grades"),
    }];
    options.extend(
        selection::grade_options(snapshot.library.characters())
            .into_iter()
            .map(|grade| SelectOption {
                key: Some(grade.as_str().to_string()),
                label: grade.as_str().to_string(),
            }),
    );
    Control::Select {
        binding: FilterBinding::Grade,
        options,
    }
}

/// Search + position + grade, as used by the roster and the guide.
pub fn filter_dock(snapshot: &Snapshot<'_>, texts: &Texts<'_>) -> Node {
    Node::Controls(vec![
        search_box(texts),
        position_select(texts),
        grade_select(snapshot, texts),
    ])
}
