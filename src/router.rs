/// Delay before restoring the scroll offset on returning home, so layout can
/// settle first.
pub const SCROLL_SETTLE_MS: u64 = 100;

/// sessionStorage key holding the last captured vertical scroll offset.
pub const SCROLL_KEY: &str = "scrollPosition";

/// The three views the site can show. Detail views are reached from Home and
/// only ever exit back to Home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    CategoryDetail(String),
    MarketplaceDetail(String),
}

/// Session-scoped storage for the captured scroll offset. At runtime this is
/// the browser's sessionStorage; tests use the in-memory stand-in.
pub trait ScrollStore {
    fn save(&mut self, offset: i64);
    fn read(&self) -> Option<i64>;
}

/// In-memory stand-in for sessionStorage.
#[derive(Debug, Default)]
pub struct SessionScroll(Option<i64>);

impl ScrollStore for SessionScroll {
    fn save(&mut self, offset: i64) {
        self.0 = Some(offset);
    }

    fn read(&self) -> Option<i64> {
        self.0
    }
}

/// Navigation state machine. Leaving Home captures the current scroll offset
/// into the store; returning yields the captured offset, which the caller
/// restores after `SCROLL_SETTLE_MS`. No offset is tracked inside a detail
/// view. The router lives for the page's lifetime; there is no terminal
/// state.
pub struct ViewRouter<S: ScrollStore> {
    view: View,
    scroll: S,
}

impl<S: ScrollStore> ViewRouter<S> {
    pub fn new(scroll: S) -> Self {
        ViewRouter {
            view: View::Home,
            scroll,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Home → CategoryDetail. Not reachable from a detail view.
    pub fn select_category(&mut self, slug: &str, offset: i64) {
        if self.view == View::Home {
            self.scroll.save(offset);
            self.view = View::CategoryDetail(slug.to_string());
        }
    }

    /// Home → MarketplaceDetail. Not reachable from a detail view.
    pub fn select_marketplace(&mut self, name: &str, offset: i64) {
        if self.view == View::Home {
            self.scroll.save(offset);
            self.view = View::MarketplaceDetail(name.to_string());
        }
    }

    /// Detail → Home. Returns the offset to restore after the settle delay,
    /// if one was captured.
    pub fn back_to_home(&mut self) -> Option<i64> {
        if self.view == View::Home {
            return None;
        }
        self.view = View::Home;
        self.scroll.read()
    }
}
