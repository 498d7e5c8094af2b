//! Build-time topology analysis over a parsed `wiring!` declaration.
//!
//! Everything here runs during macro expansion; none of the derived facts
//! survive to run time except as already-specialized generated code.

use std::collections::{HashMap, HashSet};

use quote::ToTokens;
use syn::{Ident, Path};

use crate::parse::{LoopDef, Mode, ReceiverDef};

/// Field and method names the generated loop type claims for itself.
const RESERVED_FIELDS: &[&str] = &[
  "local",
  "shared",
  "new",
  "start",
  "stop",
  "is_running",
  "try_get_event",
  "dispatch_event",
  "emitter",
  "event",
  "envelope",
  "dispatcher",
  "receiver",
  "worker",
  "dropped",
];

/// Canonical identity of an event type: its path as written, whitespace and
/// all. Two spellings of the same type alias as distinct events, which
/// mirrors routing by type identity.
pub fn key(path: &Path) -> String {
  path.to_token_stream().to_string()
}

/// Last path segment, used as the envelope variant name.
pub fn last_ident(path: &Path) -> Ident {
  path.segments.last().expect("parsed path has at least one segment").ident.clone()
}

pub fn loop_receivers(def: &LoopDef) -> Vec<&ReceiverDef> {
  def.receivers.iter().filter(|r| r.mode == Mode::LoopHosted).collect()
}

pub fn thread_receivers(def: &LoopDef) -> Vec<&ReceiverDef> {
  def.receivers.iter().filter(|r| r.mode == Mode::ThreadHosted).collect()
}

/// Loop-side event universe: concatenated `receives` of loop-hosted
/// receivers in declaration order, first occurrence kept.
pub fn loop_universe(def: &LoopDef) -> Vec<&Path> {
  let mut seen = HashSet::new();
  let mut universe = Vec::new();
  for receiver in loop_receivers(def) {
    for event in &receiver.receives {
      if seen.insert(key(event)) {
        universe.push(event);
      }
    }
  }
  universe
}

/// Every event type the declaration mentions, declaration order, deduped.
pub fn event_union(def: &LoopDef) -> Vec<&Path> {
  let mut seen = HashSet::new();
  let mut union = Vec::new();
  for receiver in &def.receivers {
    for event in receiver.receives.iter().chain(&receiver.emits) {
      if seen.insert(key(event)) {
        union.push(event);
      }
    }
  }
  for producer in &def.producers {
    for event in &producer.emits {
      if seen.insert(key(event)) {
        union.push(event);
      }
    }
  }
  union
}

pub fn loop_consumers_for<'a>(def: &'a LoopDef, event: &Path) -> Vec<&'a ReceiverDef> {
  let wanted = key(event);
  loop_receivers(def).into_iter().filter(|r| r.receives.iter().any(|e| key(e) == wanted)).collect()
}

pub fn thread_consumers_for<'a>(def: &'a LoopDef, event: &Path) -> Vec<&'a ReceiverDef> {
  let wanted = key(event);
  thread_receivers(def).into_iter().filter(|r| r.receives.iter().any(|e| key(e) == wanted)).collect()
}

pub fn has_loop_consumer(def: &LoopDef, event: &Path) -> bool {
  !loop_consumers_for(def, event).is_empty()
}

fn emits_into(emits: &[Path], receives: &[Path]) -> bool {
  let wanted: HashSet<String> = receives.iter().map(key).collect();
  emits.iter().any(|e| wanted.contains(&key(e)))
}

/// Number of distinct thread-of-origin classes that may push into the
/// receiver's inbox: the loop thread counts once no matter how many
/// loop-hosted receivers emit, every emitting thread-hosted receiver and
/// external producer counts by itself.
pub fn producer_count(def: &LoopDef, receiver: &ReceiverDef) -> usize {
  let mut count = 0;
  if loop_receivers(def).iter().any(|lr| emits_into(&lr.emits, &receiver.receives)) {
    count += 1;
  }
  count += thread_receivers(def).iter().filter(|tr| emits_into(&tr.emits, &receiver.receives)).count();
  count += def.producers.iter().filter(|p| emits_into(&p.emits, &receiver.receives)).count();
  count
}

/// Whether any remote-path emitter (thread-hosted receiver or external
/// producer) targets an event some loop-hosted receiver consumes. When
/// false the mailbox never sees remote traffic and the poll path reduces
/// to a local-only pop.
pub fn needs_shared_side(def: &LoopDef) -> bool {
  let universe: HashSet<String> = loop_universe(def).iter().map(|e| key(e)).collect();
  thread_receivers(def).iter().any(|tr| tr.emits.iter().any(|e| universe.contains(&key(e))))
    || def.producers.iter().any(|p| p.emits.iter().any(|e| universe.contains(&key(e))))
}

/// Rejects the wiring errors that are checkable before code generation.
pub fn validate(def: &LoopDef) -> syn::Result<()> {
  let mut fields = HashSet::new();
  let mut types = HashSet::new();

  for (field, ty) in def
    .receivers
    .iter()
    .map(|r| (&r.field, &r.ty))
    .chain(def.producers.iter().map(|p| (&p.field, &p.ty)))
  {
    let name = field.to_string();
    if RESERVED_FIELDS.contains(&name.as_str()) {
      return Err(syn::Error::new(field.span(), format!("`{name}` is reserved by the generated loop type")));
    }
    if !fields.insert(name.clone()) {
      return Err(syn::Error::new(field.span(), format!("duplicate field name `{name}`")));
    }
    if !types.insert(key(ty)) {
      return Err(syn::Error::new_spanned(ty, "duplicate receiver or producer type in this loop"));
    }
  }

  for receiver in &def.receivers {
    if receiver.mode == Mode::LoopHosted && receiver.inbox_capacity_set {
      return Err(syn::Error::new(
        receiver.field.span(),
        "`inbox_capacity` only applies to thread-hosted receivers",
      ));
    }
  }

  check_variant_names(&loop_universe(def))?;
  for receiver in thread_receivers(def) {
    check_variant_names(&receiver.receives.iter().collect::<Vec<_>>())?;
  }

  if u32::try_from(event_union(def).len()).is_err() {
    return Err(syn::Error::new(def.name.span(), "too many event types to index with a 32-bit tag"));
  }

  Ok(())
}

/// Distinct event paths whose last segments collide cannot share an
/// envelope enum.
fn check_variant_names(events: &[&Path]) -> syn::Result<()> {
  let mut by_variant: HashMap<String, String> = HashMap::new();
  for event in events {
    let variant = last_ident(event).to_string();
    let event_key = key(event);
    if let Some(existing) = by_variant.get(&variant) {
      if *existing != event_key {
        return Err(syn::Error::new_spanned(
          event,
          format!("event types `{existing}` and `{event_key}` would both use envelope variant `{variant}`"),
        ));
      }
    } else {
      by_variant.insert(variant, event_key);
    }
  }
  Ok(())
}
