//! Page navigation and nav-link interception.
//!
//! Pages are addressed by identifier (`"about"`) and served as
//! `<identifier><extension>` (`"about.html"`). Interception turns a click on
//! `<a href="contact.html">` into `navigate("contact")`.

use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::error::Result;
use crate::host::{ClickEvent, LinkAttrs, LinkHost, Navigator};

/// `page` with `extension` appended.
#[must_use]
pub fn page_href(page: &str, extension: &str) -> String {
    let mut href = String::with_capacity(page.len() + extension.len());
    href.push_str(page);
    href.push_str(extension);
    href
}

/// `href` with one trailing `extension` removed.
#[must_use]
pub fn page_from_href<'a>(href: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return href;
    }
    href.strip_suffix(extension).unwrap_or(href)
}

/// Point the window at the page `page`.
pub fn navigate<N: Navigator + ?Sized>(host: &N, config: &UiConfig, page: &str) -> Result<()> {
    let href = page_href(page, &config.page_extension);
    debug!(%href, "navigate");
    host.assign(&href)
}

/// Whether a click on an anchor with `attrs` should be intercepted: it has an
/// href and no (non-empty) target.
#[must_use]
pub fn should_intercept(attrs: &LinkAttrs) -> bool {
    attrs.href.is_some() && attrs.target.as_deref().is_none_or(str::is_empty)
}

/// Route clicks on nav links through [`navigate`].
///
/// Every link matched by `config.nav_link_selector` that passes
/// [`should_intercept`] gets a click handler that prevents the default action
/// and navigates to the href with its extension stripped. The href is read at
/// click time. There is no guard against running this twice; each run binds
/// another handler. Returns the number of links bound.
pub fn install_link_interception<H>(host: &H, config: &UiConfig) -> Result<usize>
where
    H: LinkHost + Navigator + Clone + 'static,
{
    let mut bound = 0;
    for link in host.query_links(&config.nav_link_selector)? {
        if !should_intercept(&host.link_attrs(&link)) {
            continue;
        }
        let click_host = host.clone();
        let click_link = link.clone();
        let click_config = config.clone();
        host.bind_click(
            &link,
            Box::new(move |event: &dyn ClickEvent| {
                event.prevent_default();
                let href = click_host.link_attrs(&click_link).href.unwrap_or_default();
                let page = page_from_href(&href, &click_config.page_extension);
                if let Err(err) = navigate(&click_host, &click_config, page) {
                    warn!(%err, %href, "nav link: navigation failed");
                }
            }),
        )?;
        bound += 1;
    }
    info!(bound, selector = %config.nav_link_selector, "nav links intercepted");
    Ok(bound)
}
