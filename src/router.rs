//! Route identifiers and the route -> renderer mapping

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterRecord;
use crate::i18n::Texts;
use crate::state::Snapshot;
use crate::view::{guide, home, roster, tierlist, DisplayTree, Node, RegionId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Home,
    Characters,
    Guide,
    TierList,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Characters, Route::Guide, Route::TierList];

    /// Parses a route id. Anything unrecognized is the home route.
    pub fn parse(id: &str) -> Route {
        match id {
            "home" => Route::Home,
            "characters" => Route::Characters,
            "guide" => Route::Guide,
            "tierlist" => Route::TierList,
            _ => Route::Home,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Characters => "characters",
            Route::Guide => "guide",
            Route::TierList => "tierlist",
        }
    }

    /// Translation key and fallback label for the navigation tab.
    pub fn label(self) -> (&'static str, &'static str) {
        match self {
            Route::Home => ("nav_home", "Home"),
            Route::Characters => ("nav_chars", "Characters"),
            Route::Guide => ("nav_guide", "Guide"),
            Route::TierList => ("nav_tierlist", "Tier List"),
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|route| *route == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Route {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Region holding the filtered items, for routes that have one.
    pub fn filtered_region(self) -> Option<RegionId> {
        match self {
            Route::Characters => Some(RegionId::RosterGrid),
            Route::Guide => Some(RegionId::GuideList),
            Route::Home | Route::TierList => None,
        }
    }
}

pub type RendererFn = fn(&Snapshot<'_>, &Texts<'_>, &[&CharacterRecord]) -> DisplayTree;

pub type RegionFn = fn(&Snapshot<'_>, &Texts<'_>, &[&CharacterRecord]) -> Vec<Node>;

pub fn resolve(route: Route) -> RendererFn {
    match route {
        Route::Home => home::render,
        Route::Characters => roster::render,
        Route::Guide => guide::render,
        Route::TierList => tierlist::render,
    }
}

pub fn resolve_region(region: RegionId) -> RegionFn {
    match region {
        RegionId::RosterGrid => roster::grid,
        RegionId::GuideList => guide::list,
    }
}
