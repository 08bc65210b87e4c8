//! Widget tree primitives.
//!
//! # Design
//! The host owns the real view hierarchy. [`WidgetStack`] is the slice of
//! it the layout helpers need: nested stacks, text nodes with color and
//! font, spacers. [`Stack`] implements it as plain data so a rendered tree
//! can be inspected in tests or handed to a host to materialize, the same
//! way `HttpRequest` describes a request without sending it.

/// A color as the host understands it, typically a hex string like `#FF0000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Font {
    System(f32),
    BoldMonospacedSystem(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

/// A text node whose color and font can be set after insertion.
pub trait WidgetText {
    fn set_text_color(&mut self, color: Option<Color>);
    fn set_font(&mut self, font: Font);
}

/// A container the layout helpers can append to.
pub trait WidgetStack {
    type Text: WidgetText;

    /// Append a nested stack and return it.
    fn add_stack(&mut self) -> &mut Self;
    fn add_text(&mut self, text: &str) -> &mut Self::Text;
    fn add_spacer(&mut self);
    fn layout_vertically(&mut self);
    fn text_color(&self) -> Option<Color>;
    fn set_text_color(&mut self, color: Option<Color>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub color: Option<Color>,
    pub font: Option<Font>,
}

impl WidgetText for Text {
    fn set_text_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Stack(Stack),
    Text(Text),
    Spacer,
}

/// Plain-data stack. A fresh `Stack` doubles as the widget root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stack {
    pub layout: Layout,
    pub text_color: Option<Color>,
    pub children: Vec<Element>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_color(color: Color) -> Self {
        Self {
            text_color: Some(color),
            ..Self::default()
        }
    }

    /// Direct child stacks, in insertion order.
    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.children.iter().filter_map(|child| match child {
            Element::Stack(stack) => Some(stack),
            _ => None,
        })
    }

    /// Direct child text nodes, in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.children.iter().filter_map(|child| match child {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }
}

impl WidgetStack for Stack {
    type Text = Text;

    fn add_stack(&mut self) -> &mut Self {
        self.children.push(Element::Stack(Stack::new()));
        match self.children.last_mut() {
            Some(Element::Stack(stack)) => stack,
            _ => unreachable!("just pushed a stack"),
        }
    }

    fn add_text(&mut self, text: &str) -> &mut Text {
        self.children.push(Element::Text(Text {
            content: text.to_string(),
            color: None,
            font: None,
        }));
        match self.children.last_mut() {
            Some(Element::Text(text)) => text,
            _ => unreachable!("just pushed a text node"),
        }
    }

    fn add_spacer(&mut self) {
        self.children.push(Element::Spacer);
    }

    fn layout_vertically(&mut self) {
        self.layout = Layout::Vertical;
    }

    fn text_color(&self) -> Option<Color> {
        self.text_color.clone()
    }

    fn set_text_color(&mut self, color: Option<Color>) {
        self.text_color = color;
    }
}
