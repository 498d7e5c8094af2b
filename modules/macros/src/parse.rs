//! Grammar of the `wiring!` declaration.

use syn::{
  braced, bracketed,
  parse::{Parse, ParseStream},
  Attribute, Ident, LitInt, Path, Token, Visibility,
};

/// Default capacity for the mailbox local ring and every inbox.
pub const DEFAULT_CAPACITY: usize = 4096;

/// One parsed `wiring!` invocation.
pub struct LoopDef {
  pub attrs:            Vec<Attribute>,
  pub vis:              Visibility,
  pub name:             Ident,
  pub mailbox_capacity: usize,
  pub receivers:        Vec<ReceiverDef>,
  pub producers:        Vec<ProducerDef>,
}

/// Where a receiver's `on_event` runs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  LoopHosted,
  ThreadHosted,
}

/// A `receiver <field>: <Type> { .. }` clause.
pub struct ReceiverDef {
  pub field:              Ident,
  pub ty:                 Path,
  pub receives:           Vec<Path>,
  pub emits:              Vec<Path>,
  pub mode:               Mode,
  pub inbox_capacity:     usize,
  pub inbox_capacity_set: bool,
}

/// A `producer <field>: <Type> { .. }` clause.
pub struct ProducerDef {
  pub field: Ident,
  pub ty:    Path,
  pub emits: Vec<Path>,
}

impl Parse for LoopDef {
  fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
    let attrs = input.call(Attribute::parse_outer)?;
    let vis: Visibility = input.parse()?;
    input.parse::<Token![loop]>()?;
    let name: Ident = input.parse()?;

    let content;
    braced!(content in input);

    let mut mailbox_capacity = DEFAULT_CAPACITY;
    let mut receivers = Vec::new();
    let mut producers = Vec::new();

    while !content.is_empty() {
      let keyword: Ident = content.parse()?;
      match keyword.to_string().as_str() {
        | "mailbox_capacity" => {
          content.parse::<Token![:]>()?;
          let lit: LitInt = content.parse()?;
          mailbox_capacity = parse_capacity(&lit)?;
        },
        | "receiver" => receivers.push(parse_receiver(&content)?),
        | "producer" => producers.push(parse_producer(&content)?),
        | other => {
          return Err(syn::Error::new(
            keyword.span(),
            format!("expected `receiver`, `producer`, or `mailbox_capacity`, found `{other}`"),
          ));
        },
      }
      if content.is_empty() {
        break;
      }
      content.parse::<Token![,]>()?;
    }

    Ok(Self { attrs, vis, name, mailbox_capacity, receivers, producers })
  }
}

fn parse_receiver(input: ParseStream<'_>) -> syn::Result<ReceiverDef> {
  let field: Ident = input.parse()?;
  input.parse::<Token![:]>()?;
  let ty: Path = input.parse()?;

  let body;
  braced!(body in input);

  let mut receives: Option<Vec<Path>> = None;
  let mut emits = Vec::new();
  let mut mode = Mode::LoopHosted;
  let mut inbox_capacity = DEFAULT_CAPACITY;
  let mut inbox_capacity_set = false;

  while !body.is_empty() {
    let key: Ident = body.parse()?;
    body.parse::<Token![:]>()?;
    match key.to_string().as_str() {
      | "receives" => receives = Some(parse_event_list(&body)?),
      | "emits" => emits = parse_event_list(&body)?,
      | "mode" => mode = parse_mode(&body)?,
      | "inbox_capacity" => {
        let lit: LitInt = body.parse()?;
        inbox_capacity = parse_capacity(&lit)?;
        inbox_capacity_set = true;
      },
      | other => {
        return Err(syn::Error::new(
          key.span(),
          format!("expected `receives`, `emits`, `mode`, or `inbox_capacity`, found `{other}`"),
        ));
      },
    }
    if body.is_empty() {
      break;
    }
    body.parse::<Token![,]>()?;
  }

  let receives =
    receives.ok_or_else(|| syn::Error::new(field.span(), "receiver must declare a `receives` event list"))?;
  if receives.is_empty() {
    return Err(syn::Error::new(field.span(), "receiver must receive at least one event type"));
  }

  Ok(ReceiverDef { field, ty, receives, emits, mode, inbox_capacity, inbox_capacity_set })
}

fn parse_producer(input: ParseStream<'_>) -> syn::Result<ProducerDef> {
  let field: Ident = input.parse()?;
  input.parse::<Token![:]>()?;
  let ty: Path = input.parse()?;

  let body;
  braced!(body in input);

  let mut emits: Option<Vec<Path>> = None;

  while !body.is_empty() {
    let key: Ident = body.parse()?;
    body.parse::<Token![:]>()?;
    match key.to_string().as_str() {
      | "emits" => emits = Some(parse_event_list(&body)?),
      | other => {
        return Err(syn::Error::new(key.span(), format!("expected `emits`, found `{other}`")));
      },
    }
    if body.is_empty() {
      break;
    }
    body.parse::<Token![,]>()?;
  }

  let emits = emits.ok_or_else(|| syn::Error::new(field.span(), "producer must declare an `emits` event list"))?;
  if emits.is_empty() {
    return Err(syn::Error::new(field.span(), "producer must emit at least one event type"));
  }

  Ok(ProducerDef { field, ty, emits })
}

fn parse_mode(input: ParseStream<'_>) -> syn::Result<Mode> {
  if input.peek(Token![loop]) {
    input.parse::<Token![loop]>()?;
    return Ok(Mode::LoopHosted);
  }
  let value: Ident = input.parse()?;
  match value.to_string().as_str() {
    | "thread" => Ok(Mode::ThreadHosted),
    | other => Err(syn::Error::new(value.span(), format!("expected `loop` or `thread`, found `{other}`"))),
  }
}

fn parse_event_list(input: ParseStream<'_>) -> syn::Result<Vec<Path>> {
  let content;
  bracketed!(content in input);
  let paths = content.parse_terminated(Path::parse, Token![,])?;

  let mut events: Vec<Path> = Vec::new();
  for path in paths {
    validate_event_path(&path)?;
    if events.iter().any(|seen| crate::topology::key(seen) == crate::topology::key(&path)) {
      return Err(syn::Error::new_spanned(&path, "duplicate event type in list"));
    }
    events.push(path);
  }
  Ok(events)
}

fn validate_event_path(path: &Path) -> syn::Result<()> {
  for segment in &path.segments {
    if !segment.arguments.is_none() {
      return Err(syn::Error::new_spanned(path, "event types must be plain paths without generic arguments"));
    }
  }
  Ok(())
}

fn parse_capacity(lit: &LitInt) -> syn::Result<usize> {
  let value: usize = lit.base10_parse()?;
  if value == 0 || !value.is_power_of_two() {
    return Err(syn::Error::new(lit.span(), "capacity must be a non-zero power of two"));
  }
  Ok(value)
}
