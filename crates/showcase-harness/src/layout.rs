#![forbid(unsafe_code)]

//! A mutable in-memory UI tree.
//!
//! Elements either sit at fixed host coordinates or live inside a scroll
//! container, in content coordinates. Scrolling a container shifts every
//! element it holds, so [`FakeLayout::bounds`] always answers with where the
//! element is now.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use showcase_core::{ContainerId, ElementId, LayoutQuery, Rect, ScrollDelta};

#[derive(Debug, Clone, Copy)]
struct Container {
    viewport: Rect,
    offset_x: i32,
    offset_y: i32,
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Fixed(Rect),
    /// Content coordinates: the element's position when the container is
    /// scrolled to the origin.
    Scrolled { container: ContainerId, content: Rect },
}

#[derive(Debug, Default)]
struct Tree {
    host: Rect,
    elements: HashMap<ElementId, Placement>,
    containers: HashMap<ContainerId, Container>,
}

/// Shared, editable layout. Clones observe the same tree.
#[derive(Debug, Clone, Default)]
pub struct FakeLayout {
    tree: Rc<RefCell<Tree>>,
}

impl FakeLayout {
    pub fn new(host: Rect) -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree {
                host,
                ..Tree::default()
            })),
        }
    }

    pub fn set_host(&self, host: Rect) {
        self.tree.borrow_mut().host = host;
    }

    /// Place an element at fixed host coordinates.
    pub fn place(&self, id: ElementId, bounds: Rect) -> &Self {
        self.tree
            .borrow_mut()
            .elements
            .insert(id, Placement::Fixed(bounds));
        self
    }

    /// Add a scroll container showing `viewport` of its content.
    pub fn container(&self, id: ContainerId, viewport: Rect) -> &Self {
        self.tree.borrow_mut().containers.insert(
            id,
            Container {
                viewport,
                offset_x: 0,
                offset_y: 0,
            },
        );
        self
    }

    /// Place an element inside a container, at content coordinates.
    pub fn place_in(&self, container: ContainerId, id: ElementId, content: Rect) -> &Self {
        self.tree
            .borrow_mut()
            .elements
            .insert(id, Placement::Scrolled { container, content });
        self
    }

    /// Detach an element; it can no longer be measured.
    pub fn remove(&self, id: ElementId) {
        self.tree.borrow_mut().elements.remove(&id);
    }

    /// Destroy a container; its elements can no longer be measured.
    pub fn remove_container(&self, id: ContainerId) {
        self.tree.borrow_mut().containers.remove(&id);
    }

    /// Scroll a container. Returns `false` if it does not exist.
    pub fn scroll_by(&self, id: ContainerId, delta: ScrollDelta) -> bool {
        match self.tree.borrow_mut().containers.get_mut(&id) {
            Some(container) => {
                container.offset_x = container.offset_x.saturating_add(delta.dx);
                container.offset_y = container.offset_y.saturating_add(delta.dy);
                true
            }
            None => false,
        }
    }

    /// Current scroll offset of a container.
    pub fn scroll_offset(&self, id: ContainerId) -> Option<(i32, i32)> {
        self.tree
            .borrow()
            .containers
            .get(&id)
            .map(|c| (c.offset_x, c.offset_y))
    }
}

impl LayoutQuery for FakeLayout {
    fn host_bounds(&self) -> Rect {
        self.tree.borrow().host
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        let tree = self.tree.borrow();
        match *tree.elements.get(&element)? {
            Placement::Fixed(bounds) => Some(bounds),
            Placement::Scrolled { container, content } => {
                let c = tree.containers.get(&container)?;
                Some(content.translate(
                    c.viewport.x.saturating_sub(c.offset_x),
                    c.viewport.y.saturating_sub(c.offset_y),
                ))
            }
        }
    }

    fn viewport_visible_rect(&self, container: ContainerId) -> Option<Rect> {
        self.tree.borrow().containers.get(&container).map(|c| c.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: ContainerId = ContainerId(1);
    const ROW: ElementId = ElementId(10);

    #[test]
    fn scrolled_elements_move_with_offset() {
        let layout = FakeLayout::new(Rect::from_size(320, 640));
        layout
            .container(LIST, Rect::new(0, 40, 320, 600))
            .place_in(LIST, ROW, Rect::new(0, 900, 320, 48));

        assert_eq!(layout.bounds(ROW), Some(Rect::new(0, 940, 320, 48)));
        assert!(layout.scroll_by(LIST, ScrollDelta::new(0, 400)));
        assert_eq!(layout.scroll_offset(LIST), Some((0, 400)));
        assert_eq!(layout.bounds(ROW), Some(Rect::new(0, 540, 320, 48)));
    }

    #[test]
    fn removed_things_are_unmeasurable() {
        let layout = FakeLayout::new(Rect::from_size(100, 100));
        layout
            .container(LIST, Rect::from_size(100, 100))
            .place_in(LIST, ROW, Rect::new(0, 0, 10, 10))
            .place(ElementId(2), Rect::new(1, 1, 5, 5));

        layout.remove(ElementId(2));
        assert_eq!(layout.bounds(ElementId(2)), None);

        layout.remove_container(LIST);
        assert_eq!(layout.bounds(ROW), None);
        assert_eq!(layout.viewport_visible_rect(LIST), None);
        assert!(!layout.scroll_by(LIST, ScrollDelta::new(0, 1)));
    }

    #[test]
    fn clones_share_the_tree() {
        let layout = FakeLayout::new(Rect::from_size(100, 100));
        let view = layout.clone();
        layout.set_host(Rect::from_size(50, 50));
        assert_eq!(view.host_bounds(), Rect::from_size(50, 50));
    }
}
