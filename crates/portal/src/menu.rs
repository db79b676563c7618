use crate::page::{Handler, Page, selectors};

/// Class marking the navigation as open.
pub const NAV_OPEN: &str = "active";

/// Attaches the toggle handler when both the control and the navigation exist.
pub fn setup_menu_toggle(page: &mut Page) -> bool {
    if !page.exists(selectors::NAV) {
        return false;
    }
    match page.element_mut(selectors::MENU_TOGGLE) {
        Some(toggle) => {
            toggle.add_listener(Handler::MenuToggle);
            true
        }
        None => false,
    }
}

/// Clicks the menu toggle; returns whether the navigation is now open.
pub fn click_menu_toggle(page: &mut Page) -> Option<bool> {
    let wired = page
        .element(selectors::MENU_TOGGLE)
        .is_some_and(|toggle| toggle.has_listener(Handler::MenuToggle));
    if !wired {
        return None;
    }
    page.element_mut(selectors::NAV)
        .map(|nav| nav.classes_mut().toggle(NAV_OPEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_nav_class() {
        let mut page = Page::parse("index.html")
            .unwrap()
            .with_mounts([selectors::NAV, selectors::MENU_TOGGLE]);
        assert!(setup_menu_toggle(&mut page));
        assert_eq!(click_menu_toggle(&mut page), Some(true));
        assert!(page.element(selectors::NAV).unwrap().classes().contains(NAV_OPEN));
        assert_eq!(click_menu_toggle(&mut page), Some(false));
    }

    #[test]
    fn missing_nav_leaves_toggle_unwired() {
        let mut page = Page::parse("index.html")
            .unwrap()
            .with_mount(selectors::MENU_TOGGLE);
        assert!(!setup_menu_toggle(&mut page));
        assert_eq!(click_menu_toggle(&mut page), None);
    }
}
