//! The template engine.
//!
//! [`Engine`] walks a template once, copying literal text into a reusable
//! working buffer and dispatching on two kinds of constructs:
//!
//! - `{0}` / `{name}` placeholders, resolved from an [`ArgList`] or a
//!   variable resolver callback;
//! - `<name[=value]>` / `</name>` tags, resolved through a color map, an
//!   alias map, or processor callbacks. First match wins, unmatched tags
//!   pass through verbatim.
//!
//! Malformed constructs never fail a render: when a tag or placeholder
//! cannot be completed, its opening delimiter is emitted literally and
//! scanning resumes one character after it.
//!
//! # Example
//!
//! ```rust
//! use zerofmt::{ArgList, Engine, ViewMap};
//!
//! let args: ArgList = ["World"].into_iter().collect();
//! let colors: ViewMap<String> = [("warn", "#E06C75".to_string())].into_iter().collect();
//!
//! let mut fmt = Engine::new();
//! fmt.setup("<color=warn>Hello {0}!</color>")
//!     .args(&args)
//!     .colors(&colors);
//! assert_eq!(fmt.render(), "<color=#E06C75>Hello World!</color>");
//! ```
//!
//! A single engine instance is meant for single-threaded use: the working
//! buffer and the lazily created secondary engine are mutable shared state.
//! Use one instance per thread.

use zerofmt_view::{Backing, StrView, ViewMap};

use crate::args::ArgList;
use crate::error::Result;
use crate::num;
use crate::value::{Decimals, TimerStyle};

/// Resolves a named placeholder by writing replacement text into the output.
pub type VarResolver<'m> = dyn Fn(StrView<'_>, &mut Output<'_, 'm>) + 'm;

/// Handles a registered tag: `(is_closing, value, output)`.
pub type TagProcessor<'m> = dyn Fn(bool, StrView<'_>, &mut Output<'_, 'm>) + 'm;

const NESTED_CAPACITY: usize = 128;

/// The template engine. See the [module docs](self) for an overview.
///
/// The configuration surface is entirely optional and independently toggled;
/// tags are only parsed when at least one tag map is installed, placeholders
/// only when arguments or a variable resolver are.
pub struct Engine<'m> {
    buf: String,
    nested: Option<Box<Engine<'m>>>,
    template: StrView<'m>,
    args: Option<&'m ArgList<'m>>,
    vars: Option<&'m VarResolver<'m>>,
    colors: Option<&'m ViewMap<String>>,
    aliases: Option<&'m ViewMap<(String, String)>>,
    processors: Option<&'m ViewMap<Box<TagProcessor<'m>>>>,
}

impl<'m> Engine<'m> {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Engine {
            buf: String::with_capacity(capacity),
            nested: None,
            template: StrView::empty(),
            args: None,
            vars: None,
            colors: None,
            aliases: None,
            processors: None,
        }
    }

    /// Installs a template and drops all previous configuration.
    pub fn setup(&mut self, template: impl Into<StrView<'m>>) -> &mut Self {
        self.template = template.into();
        self.args = None;
        self.vars = None;
        self.colors = None;
        self.aliases = None;
        self.processors = None;
        self
    }

    /// Enables `{0}`-style positional placeholders.
    pub fn args(&mut self, args: &'m ArgList<'m>) -> &mut Self {
        self.args = Some(args);
        self
    }

    /// Enables `{name}`-style placeholders, resolved through `resolver`.
    pub fn variables(&mut self, resolver: &'m VarResolver<'m>) -> &mut Self {
        self.vars = Some(resolver);
        self
    }

    /// Rewrites `<color=NAME>` tags whose NAME the map knows.
    pub fn colors(&mut self, map: &'m ViewMap<String>) -> &mut Self {
        self.colors = Some(map);
        self
    }

    /// Replaces known tags with their (open, close) expansion text; the
    /// expansion is itself run through the full pipeline.
    pub fn aliases(&mut self, map: &'m ViewMap<(String, String)>) -> &mut Self {
        self.aliases = Some(map);
        self
    }

    /// Dispatches known tags to callbacks.
    pub fn processors(&mut self, map: &'m ViewMap<Box<TagProcessor<'m>>>) -> &mut Self {
        self.processors = Some(map);
        self
    }

    /// Renders the template into an owned string.
    ///
    /// The working buffer is reset and reused; its capacity only grows.
    pub fn render(&mut self) -> String {
        self.buf.clear();
        let template = self.template;
        self.process_view(template);
        self.buf.clone()
    }

    /// Renders and returns a zero-copy view over the internal buffer.
    ///
    /// The view is valid until the next render call reuses the buffer; the
    /// borrow rules enforce exactly that.
    pub fn render_view(&mut self) -> StrView<'_> {
        self.buf.clear();
        let template = self.template;
        self.process_view(template);
        StrView::new(&self.buf)
    }

    fn process_view(&mut self, view: StrView<'_>) {
        self.process_src(view.backing());
    }

    fn process_src(&mut self, src: Backing<'_>) {
        let parse_tags =
            self.colors.is_some() || self.aliases.is_some() || self.processors.is_some();
        let parse_args = self.args.is_some() || self.vars.is_some();

        let mut cur = Cursor::new(src);
        while let Some(c) = cur.peek() {
            if parse_tags && c == '<' {
                self.parse_tag(&mut cur);
            } else if parse_args && c == '{' {
                self.parse_placeholder(&mut cur);
            } else {
                self.buf.push(c);
                cur.bump(c);
            }
        }
    }

    // ==================== Placeholders ====================

    fn parse_placeholder(&mut self, cur: &mut Cursor<'_>) {
        let open_pos = cur.pos;
        cur.bump('{');

        // Open: a digit means positional (needs args), a letter means named
        // (needs a resolver); anything else reverts.
        let (kind, body_start) = match (cur.peek(), self.args, self.vars) {
            (Some(c), Some(list), _) if c.is_ascii_digit() => {
                let start = cur.pos;
                cur.bump(c);
                (PlaceholderKind::Positional(list), start)
            }
            (Some(c), _, Some(resolver)) if c.is_alphabetic() => {
                let start = cur.pos;
                cur.bump(c);
                (PlaceholderKind::Named(resolver), start)
            }
            _ => {
                self.buf.push('{');
                cur.pos = open_pos + 1;
                return;
            }
        };

        loop {
            match cur.peek() {
                Some(c) if c.is_ascii_digit() => cur.bump(c),
                Some(c)
                    if matches!(kind, PlaceholderKind::Named(_))
                        && (c.is_alphabetic() || c == '_' || c == '-') =>
                {
                    cur.bump(c)
                }
                Some('}') => {
                    let body = cur.view(body_start, cur.pos);
                    cur.bump('}');
                    self.close_placeholder(kind, body);
                    return;
                }
                _ => {
                    self.buf.push('{');
                    cur.pos = open_pos + 1;
                    return;
                }
            }
        }
    }

    fn close_placeholder(&mut self, kind: PlaceholderKind<'m>, body: StrView<'_>) {
        match kind {
            PlaceholderKind::Positional(list) => match body.parse_int() {
                Some(n) if n >= 0 && (n as usize) < list.len() => {
                    list[n as usize].write_to(&mut self.buf);
                }
                // Unparsable or out-of-bounds indices fall back to the
                // literal text, not an error.
                _ => {
                    self.buf.push('{');
                    self.append_view(&body);
                    self.buf.push('}');
                }
            },
            PlaceholderKind::Named(resolver) => {
                let mut out = Output { fmt: self };
                resolver(body, &mut out);
            }
        }
    }

    // ==================== Tags ====================

    fn parse_tag(&mut self, cur: &mut Cursor<'_>) {
        let open_pos = cur.pos;
        cur.bump('<');

        let mut state = TagState::Open;
        let mut slash = false;
        let mut seg_start = cur.pos;
        let mut name = StrView::empty();
        let mut name_nested = false;
        let mut value = StrView::empty();
        let mut value_nested = false;

        loop {
            let Some(c) = cur.peek() else {
                // Ran past the template end: restore the '<' as literal text
                // and resume right after it.
                self.buf.push('<');
                cur.pos = open_pos + 1;
                return;
            };
            match state {
                TagState::Open => match c {
                    '/' => {
                        slash = true;
                        cur.bump(c);
                    }
                    '>' => {
                        cur.bump(c);
                        break;
                    }
                    _ => {
                        state = TagState::Name;
                        seg_start = cur.pos;
                        if c == '{' {
                            name_nested = true;
                        }
                        cur.bump(c);
                    }
                },
                TagState::Name => match c {
                    '=' => {
                        name = cur.view(seg_start, cur.pos);
                        cur.bump(c);
                        state = TagState::Value;
                        seg_start = cur.pos;
                    }
                    '>' => {
                        name = cur.view(seg_start, cur.pos);
                        cur.bump(c);
                        break;
                    }
                    _ => {
                        if c == '{' {
                            name_nested = true;
                        }
                        cur.bump(c);
                    }
                },
                TagState::Value => match c {
                    '>' => {
                        value = cur.view(seg_start, cur.pos);
                        cur.bump(c);
                        break;
                    }
                    _ => {
                        if c == '{' {
                            value_nested = true;
                        }
                        cur.bump(c);
                    }
                },
            }
        }

        self.close_tag(slash, name, name_nested, value, value_nested);
    }

    fn close_tag(
        &mut self,
        slash: bool,
        name: StrView<'_>,
        name_nested: bool,
        value: StrView<'_>,
        value_nested: bool,
    ) {
        let args = self.args;
        let vars = self.vars;
        let colors = self.colors;
        let aliases = self.aliases;
        let processors = self.processors;

        let substitutable = args.is_some() || vars.is_some();
        let name_nested = name_nested && substitutable;
        let value_nested = value_nested && substitutable;

        // The secondary engine is taken out of `self` while segments borrow
        // its buffer, and restored below.
        let mut nested: Option<Box<Engine<'m>>> = None;

        let name = if name_nested {
            let inner = nested.get_or_insert_with(|| self.take_nested());
            inner.prepare_nested(args, vars);
            inner.process_view(name);
            inner.buffer_view()
        } else {
            name
        };

        if let Some(mapped) = colors
            .filter(|_| name == "color")
            .and_then(|map| map.get(&value))
        {
            self.buf.push('<');
            self.append_view(&name);
            self.buf.push('=');
            self.buf.push_str(mapped);
            self.buf.push('>');
        } else if let Some(alias) = aliases.and_then(|map| map.get(&name)) {
            let expansion: &str = if slash { &alias.1 } else { &alias.0 };
            self.process_src(Backing::Str(expansion));
        } else if let Some(processor) = processors.and_then(|map| map.get(&name)) {
            let value = if value_nested {
                let inner = nested.get_or_insert_with(|| self.take_nested());
                inner.prepare_nested(args, vars);
                inner.process_view(value);
                inner.buffer_view()
            } else {
                value
            };
            let mut out = Output { fmt: self };
            processor(slash, value, &mut out);
        } else {
            self.buf.push('<');
            if slash {
                self.buf.push('/');
            }
            self.append_view(&name);
            if !value.is_empty() {
                self.buf.push('=');
                self.append_view(&value);
            }
            self.buf.push('>');
        }

        if let Some(inner) = nested {
            self.nested = Some(inner);
        }
    }

    // ==================== Nested resolution ====================

    fn take_nested(&mut self) -> Box<Engine<'m>> {
        self.nested
            .take()
            .unwrap_or_else(|| Box::new(Engine::with_capacity(NESTED_CAPACITY)))
    }

    /// Configures the secondary engine for segment resolution: same args and
    /// resolver, no tag maps, fresh buffer.
    fn prepare_nested(
        &mut self,
        args: Option<&'m ArgList<'m>>,
        vars: Option<&'m VarResolver<'m>>,
    ) {
        self.args = args;
        self.vars = vars;
        self.colors = None;
        self.aliases = None;
        self.processors = None;
        self.template = StrView::empty();
        self.buf.clear();
    }

    fn buffer_view(&self) -> StrView<'_> {
        StrView::new(&self.buf)
    }

    fn append_view(&mut self, view: &StrView<'_>) {
        match view.backing() {
            Backing::Str(s) => self.buf.push_str(s),
            Backing::Chars(chars) => self.buf.extend(chars),
        }
    }
}

impl Default for Engine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

enum PlaceholderKind<'m> {
    Positional(&'m ArgList<'m>),
    Named(&'m VarResolver<'m>),
}

enum TagState {
    Open,
    Name,
    Value,
}

/// Write handle passed to variable resolvers and tag processors.
///
/// Appends go straight into the engine's working buffer. Appended text is
/// not re-scanned; a callback that wants its output run through the pipeline
/// again calls [`process`](Output::process) explicitly.
pub struct Output<'e, 'm> {
    fmt: &'e mut Engine<'m>,
}

impl<'e, 'm> Output<'e, 'm> {
    pub fn append_char(&mut self, c: char) {
        self.fmt.buf.push(c);
    }

    pub fn append_str(&mut self, s: &str) {
        self.fmt.buf.push_str(s);
    }

    pub fn append_view(&mut self, view: &StrView<'_>) {
        self.fmt.append_view(view);
    }

    /// Renders an integer in `base` (2..=36).
    pub fn append_int(&mut self, value: i64, base: u32) -> Result<()> {
        num::write_int(&mut self.fmt.buf, value, base)
    }

    pub fn append_float(&mut self, value: f64, decimals: Decimals) {
        num::write_float(&mut self.fmt.buf, value, decimals);
    }

    pub fn append_timer(&mut self, seconds: i64, style: TimerStyle) {
        num::write_timer(&mut self.fmt.buf, seconds, style);
    }

    /// Runs `template` through the engine's full pipeline (tags,
    /// placeholders, and all), appending the result.
    pub fn process(&mut self, template: &str) {
        self.fmt.process_src(Backing::Str(template));
    }

    pub fn process_view(&mut self, view: &StrView<'_>) {
        self.fmt.process_view(*view);
    }
}

/// Position-tracked scanner over a template source.
///
/// Positions are native units of the backing store (bytes for strings,
/// elements for char slices). All structural characters are ASCII, so
/// segment boundaries always land on character boundaries.
struct Cursor<'s> {
    src: Backing<'s>,
    pos: usize,
    end: usize,
}

impl<'s> Cursor<'s> {
    fn new(src: Backing<'s>) -> Self {
        let end = match src {
            Backing::Str(s) => s.len(),
            Backing::Chars(c) => c.len(),
        };
        Cursor { src, pos: 0, end }
    }

    fn peek(&self) -> Option<char> {
        if self.pos >= self.end {
            return None;
        }
        match self.src {
            Backing::Str(s) => s[self.pos..].chars().next(),
            Backing::Chars(c) => c.get(self.pos).copied(),
        }
    }

    fn bump(&mut self, c: char) {
        self.pos += match self.src {
            Backing::Str(_) => c.len_utf8(),
            Backing::Chars(_) => 1,
        };
    }

    fn view(&self, start: usize, end: usize) -> StrView<'s> {
        match self.src {
            Backing::Str(s) => StrView::new(&s[start..end]),
            Backing::Chars(c) => StrView::from_chars(&c[start..end]),
        }
    }
}
