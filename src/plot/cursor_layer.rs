use crate::cursor_ctrl::{BySide, Circle, HoverEvent, Side};
use iced::{
    advanced::{
        layout::{Layout, Limits, Node},
        renderer::{Quad, Style},
        widget::{tree, Tree, Widget},
        Clipboard, Renderer as _, Shell,
    },
    event::Status,
    mouse::{self, Cursor, Interaction},
    Border, Color, Element, Event, Length, Point, Rectangle, Renderer, Size, Theme,
};
use std::fmt::{Debug, Formatter};

/// What the pointer did to the cursors of one panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CursorEvent {
    Resized(Size),
    Entered(HoverEvent),
    Exited(Side),
    /// `pointer_x` is relative to the panel, not to the cursor
    Dragged { source: Side, pointer_x: f32 },
    Released(Side),
}

/// Snapshot of one cursor as the panel should draw it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarkerView {
    pub x: f32,
    pub bar_len: f32,
    /// only cursors that can be grabbed have a circle
    pub circle: Option<Circle>,
}

#[derive(Default)]
struct State {
    hovering: Option<Side>,
    dragging: Option<Side>,
    last_bounds: Option<Rectangle>,
}

/// Overlays the two cursors on top of a plot panel.
pub struct CursorLayer<'a, Message> {
    content: Element<'a, Message>,
    markers: BySide<MarkerView>,
    /// whether the cursors react to the pointer
    interactive: bool,
    grab_width: f32,
    on_event: fn(CursorEvent) -> Message,
}

impl<Message> Debug for CursorLayer<'_, Message> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorLayer")
            .field("markers", &self.markers)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

impl<'a, Message> CursorLayer<'a, Message> {
    pub fn new(
        content: impl Into<Element<'a, Message>>,
        markers: BySide<MarkerView>,
        on_event: fn(CursorEvent) -> Message,
    ) -> Self {
        Self {
            content: content.into(),
            markers,
            interactive: false,
            grab_width: 10.0,
            on_event,
        }
    }

    pub fn interactive(mut self, grab_width: f32) -> Self {
        self.interactive = true;
        self.grab_width = grab_width;
        self
    }

    fn on_mouse(
        &self,
        state: &mut State,
        event: mouse::Event,
        cursor: Cursor,
        bounds: Rectangle,
        shell: &mut Shell<'_, Message>,
    ) -> Status {
        match event {
            mouse::Event::CursorMoved { .. } => {
                if let Some(side) = state.dragging {
                    if let Some(position) = cursor.position() {
                        shell.publish((self.on_event)(CursorEvent::Dragged {
                            source: side,
                            pointer_x: position.x - bounds.x,
                        }));
                    } else {
                        state.dragging = None;
                        shell.publish((self.on_event)(CursorEvent::Released(side)));
                    }
                    return Status::Captured;
                }

                let position = cursor.position_in(bounds);
                let hovered = position.and_then(|p| hit(&self.markers, self.grab_width, p.x));

                if hovered != state.hovering {
                    if let Some(side) = state.hovering.take() {
                        shell.publish((self.on_event)(CursorEvent::Exited(side)));
                    }

                    if let (Some(side), Some(position)) = (hovered, position) {
                        shell.publish((self.on_event)(CursorEvent::Entered(HoverEvent {
                            source: side,
                            y: position.y,
                        })));
                        state.hovering = Some(side);
                    }
                }
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                if let Some(side) = state.hovering {
                    state.dragging = Some(side);
                    return Status::Captured;
                }
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                if let Some(side) = state.dragging.take() {
                    shell.publish((self.on_event)(CursorEvent::Released(side)));
                    return Status::Captured;
                }
            }
            mouse::Event::CursorLeft => {
                if state.dragging.is_none() {
                    if let Some(side) = state.hovering.take() {
                        shell.publish((self.on_event)(CursorEvent::Exited(side)));
                    }
                }
            }
            _ => {}
        }

        Status::Ignored
    }

    fn draw_marker(
        &self,
        renderer: &mut Renderer,
        theme: &Theme,
        bounds: Rectangle,
        marker: &MarkerView,
        active: bool,
    ) {
        let palette = theme.extended_palette();
        let color = if active {
            palette.primary.strong.color
        } else {
            palette.primary.base.color
        };

        renderer.fill_quad(
            Quad {
                bounds: Rectangle::new(
                    Point::new(bounds.x + marker.x - 0.5, bounds.y),
                    Size::new(1.0, marker.bar_len.max(0.0)),
                ),
                ..Quad::default()
            },
            color,
        );

        if let Some(circle) = marker.circle {
            let radius = circle.radius * circle.scale_x.max(circle.scale_y);

            renderer.fill_quad(
                Quad {
                    bounds: Rectangle::new(
                        Point::new(
                            bounds.x + marker.x - radius,
                            bounds.y + circle.center_y - radius,
                        ),
                        Size::new(2.0 * radius, 2.0 * radius),
                    ),
                    border: Border {
                        radius: radius.into(),
                        width: 1.0,
                        color: Color::WHITE,
                    },
                    ..Quad::default()
                },
                color,
            );
        }
    }
}

/// The cursor whose bar is under `x`, preferring the one that can still move towards the pointer.
fn hit(markers: &BySide<MarkerView>, grab_width: f32, x: f32) -> Option<Side> {
    let distance = |side: Side| (x - markers[side].x).abs();
    let near = |side: Side| distance(side) <= grab_width / 2.0;

    match (near(Side::Left), near(Side::Right)) {
        (false, false) => None,
        (true, false) => Some(Side::Left),
        (false, true) => Some(Side::Right),
        (true, true) => {
            if x > markers.right.x {
                Some(Side::Right)
            } else if x < markers.left.x || distance(Side::Left) < distance(Side::Right) {
                Some(Side::Left)
            } else {
                Some(Side::Right)
            }
        }
    }
}

impl<Message> Widget<Message, Theme, Renderer> for CursorLayer<'_, Message> {
    fn size(&self) -> Size<Length> {
        self.content.as_widget().size()
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn layout(&self, tree: &mut Tree, renderer: &Renderer, limits: &Limits) -> Node {
        let content = self
            .content
            .as_widget()
            .layout(&mut tree.children[0], renderer, limits);

        Node::with_children(content.size(), vec![content])
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) -> Status {
        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<State>();

        if state.last_bounds != Some(bounds) {
            state.last_bounds = Some(bounds);
            shell.publish((self.on_event)(CursorEvent::Resized(bounds.size())));
        }

        if self.interactive {
            if let Event::Mouse(event) = event {
                if self.on_mouse(state, event, cursor, bounds, shell) == Status::Captured {
                    return Status::Captured;
                }
            }
        }

        let Some(content_layout) = layout.children().next() else {
            return Status::Ignored;
        };

        self.content.as_widget_mut().on_event(
            &mut tree.children[0],
            event,
            content_layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        )
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> Interaction {
        let state = tree.state.downcast_ref::<State>();

        if state.dragging.is_some() || state.hovering.is_some() {
            return Interaction::ResizingHorizontally;
        }

        layout
            .children()
            .next()
            .map_or_else(Interaction::default, |content_layout| {
                self.content.as_widget().mouse_interaction(
                    &tree.children[0],
                    content_layout,
                    cursor,
                    viewport,
                    renderer,
                )
            })
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &Style,
        layout: Layout<'_>,
        cursor: Cursor,
        viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<State>();
        let bounds = layout.bounds();

        if let Some(content_layout) = layout.children().next() {
            self.content.as_widget().draw(
                &tree.children[0],
                renderer,
                theme,
                style,
                content_layout,
                cursor,
                viewport,
            );
        }

        renderer.with_layer(bounds, |renderer| {
            for side in Side::ALL {
                let marker = &self.markers[side];
                let active = state.dragging == Some(side)
                    || marker.circle.is_some_and(|circle| circle.is_highlighted());
                self.draw_marker(renderer, theme, bounds, marker, active);
            }
        });
    }
}

impl<'a, Message> From<CursorLayer<'a, Message>> for Element<'a, Message>
where
    Message: 'a,
{
    fn from(cursor_layer: CursorLayer<'a, Message>) -> Self {
        Self::new(cursor_layer)
    }
}
