//! Hiding interactive chrome for the duration of a capture.

use tracing::debug;

use crate::layout::{LayoutNode, LayoutTree, Visibility};

/// Hides every export-hidden node while alive and makes them visible again
/// on drop, on every exit path including early returns and panics.
pub struct ChromeGuard<'a> {
    tree: &'a mut LayoutTree,
    hidden: usize,
}

fn set_chrome_visibility(tree: &mut LayoutTree, visibility: Visibility) -> usize {
    let mut touched = 0;
    tree.visit_mut(&mut |node: &mut LayoutNode| {
        if node.export_hidden {
            node.visibility = visibility;
            touched += 1;
        }
    });
    touched
}

impl<'a> ChromeGuard<'a> {
    pub fn hide(tree: &'a mut LayoutTree) -> Self {
        let hidden = set_chrome_visibility(tree, Visibility::Hidden);
        debug!(hidden, "chrome hidden for capture");
        ChromeGuard { tree, hidden }
    }

    pub fn tree(&self) -> &LayoutTree {
        &*self.tree
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden
    }
}

impl Drop for ChromeGuard<'_> {
    fn drop(&mut self) {
        set_chrome_visibility(&mut *self.tree, Visibility::Visible);
        debug!(restored = self.hidden, "chrome restored");
    }
}
