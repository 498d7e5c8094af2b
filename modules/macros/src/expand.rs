//! Code generation for one `wiring!` declaration.
//!
//! The topology facts computed in [`crate::topology`] are burned into the
//! generated code here: routing bodies contain exactly the pushes the
//! declaration calls for, inbox fields get the queue type the producer
//! count selected, and emits with no consumer compile down to nothing.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, Path};

use crate::{
  parse::{LoopDef, Mode, ReceiverDef},
  topology::{self, key, last_ident},
};

fn krate() -> TokenStream {
  quote!(::hardwire_core_rs)
}

fn env_ident(def: &LoopDef) -> Ident {
  format_ident!("{}Event", def.name)
}

fn shared_ident(def: &LoopDef) -> Ident {
  format_ident!("{}Shared", def.name)
}

fn thread_env_ident(def: &LoopDef, receiver: &ReceiverDef) -> Ident {
  format_ident!("{}{}Event", def.name, last_ident(&receiver.ty))
}

fn alias_ident(def: &LoopDef, receiver: &ReceiverDef) -> Ident {
  format_ident!("{}{}Dispatcher", def.name, last_ident(&receiver.ty))
}

fn inbox_ident(receiver: &ReceiverDef) -> Ident {
  format_ident!("{}_inbox", receiver.field)
}

fn inbox_type(def: &LoopDef, receiver: &ReceiverDef) -> TokenStream {
  let core = krate();
  let env = thread_env_ident(def, receiver);
  let cap = receiver.inbox_capacity;
  if topology::producer_count(def, receiver) <= 1 {
    quote!(#core::SpscInbox<#env, #cap>)
  } else {
    quote!(#core::MpscInbox<#env, #cap>)
  }
}

pub fn expand(def: &LoopDef) -> syn::Result<TokenStream> {
  topology::validate(def)?;

  let envelopes = envelopes(def);
  let shared = shared_struct(def);
  let loop_ty = loop_struct(def);
  let loop_impl = loop_inherent_impl(def);
  let traits = trait_impls(def);
  let routes = route_impls(def);
  let emits = emit_impls(def);
  let aliases = dispatcher_aliases(def);

  Ok(quote! {
    #envelopes
    #shared
    #loop_ty
    #loop_impl
    #traits
    #routes
    #emits
    #aliases
  })
}

fn envelope_enum(def: &LoopDef, ident: &Ident, events: &[&Path], doc: &str) -> TokenStream {
  let vis = &def.vis;
  let repr = match events.len() {
    | 0 => quote!(),
    | 1..=255 => quote!(#[repr(u8)]),
    | 256..=65535 => quote!(#[repr(u16)]),
    | _ => quote!(#[repr(u32)]),
  };
  let variants = events.iter().map(|event| {
    let variant = last_ident(event);
    let vdoc = format!("Envelope case carrying a `{}`.", key(event));
    quote!(#[doc = #vdoc] #variant(#event))
  });
  let index_body = if events.is_empty() {
    quote!(match *self {})
  } else {
    let arms = events.iter().enumerate().map(|(position, event)| {
      let variant = last_ident(event);
      quote!(Self::#variant(_) => #position)
    });
    quote!(match self { #(#arms,)* })
  };
  quote! {
    #[doc = #doc]
    #repr
    #vis enum #ident {
      #(#variants,)*
    }

    impl #ident {
      /// Position of the live variant's event type in this envelope's universe.
      #[must_use]
      #vis const fn index(&self) -> usize {
        #index_body
      }
    }
  }
}

fn envelopes(def: &LoopDef) -> TokenStream {
  let name = &def.name;
  let loop_env = env_ident(def);
  let universe = topology::loop_universe(def);
  let loop_doc = format!("Event envelope for the loop-side universe of [`{name}`].");
  let loop_enum = envelope_enum(def, &loop_env, &universe, &loop_doc);

  let thread_enums = topology::thread_receivers(def).into_iter().map(|receiver| {
    let ident = thread_env_ident(def, receiver);
    let events: Vec<&Path> = receiver.receives.iter().collect();
    let doc = format!("Event envelope for the `{}` inbox of [`{name}`].", receiver.field);
    envelope_enum(def, &ident, &events, &doc)
  });

  quote! {
    #loop_enum
    #(#thread_enums)*
  }
}

fn shared_struct(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let name = &def.name;
  let shared = shared_ident(def);
  let env = env_ident(def);
  let doc = format!("State of [`{name}`] shared with workers and external emitters.");
  let inbox_fields = topology::thread_receivers(def).into_iter().map(|receiver| {
    let field = inbox_ident(receiver);
    let ty = inbox_type(def, receiver);
    quote!(#field: #ty)
  });
  quote! {
    #[doc = #doc]
    #vis struct #shared {
      remote: #core::RemoteQueue<#env>,
      #(#inbox_fields,)*
      running: ::core::sync::atomic::AtomicBool,
    }
  }
}

fn loop_struct(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let name = &def.name;
  let shared = shared_ident(def);
  let env = env_ident(def);
  let cap = def.mailbox_capacity;
  let attrs = &def.attrs;
  let default_doc = if def.attrs.is_empty() {
    let doc = format!("Statically wired event loop `{name}`.");
    quote!(#[doc = #doc])
  } else {
    quote!()
  };
  let fields = def.receivers.iter().map(|receiver| {
    let field = &receiver.field;
    let ty = &receiver.ty;
    match receiver.mode {
      | Mode::LoopHosted => quote!(#field: #ty),
      | Mode::ThreadHosted => quote!(#field: #core::ThreadHost<#ty>),
    }
  });
  quote! {
    #(#attrs)*
    #default_doc
    #vis struct #name {
      #(#fields,)*
      local: #core::RingBuffer<#env, #cap>,
      shared: ::std::sync::Arc<#shared>,
    }
  }
}

fn loop_inherent_impl(def: &LoopDef) -> TokenStream {
  let name = &def.name;
  let new_fn = new_fn(def);
  let start_fn = start_fn(def);
  let stop_fn = stop_fn(def);
  let running_fn = running_fn(def);
  let poll_fns = poll_fns(def);
  let dispatch_fn = dispatch_fn(def);
  let accessors = accessors(def);
  let consts = inbox_consts(def);
  let emitter_fn = emitter_fn(def);
  quote! {
    impl #name {
      #new_fn
      #start_fn
      #stop_fn
      #running_fn
      #poll_fns
      #dispatch_fn
      #accessors
      #consts
      #emitter_fn
    }
  }
}

fn new_fn(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let shared = shared_ident(def);
  let params = def.receivers.iter().map(|receiver| {
    let field = &receiver.field;
    let ty = &receiver.ty;
    quote!(#field: #ty)
  });
  let shared_inits = topology::thread_receivers(def).into_iter().map(|receiver| {
    let field = inbox_ident(receiver);
    let ty = inbox_type(def, receiver);
    quote!(#field: <#ty>::new())
  });
  let field_inits = def.receivers.iter().map(|receiver| {
    let field = &receiver.field;
    match receiver.mode {
      | Mode::LoopHosted => quote!(#field),
      | Mode::ThreadHosted => quote!(#field: #core::ThreadHost::new(#field)),
    }
  });
  quote! {
    /// Builds the loop from its receivers in declaration order.
    #[must_use]
    #vis fn new(#(#params),*) -> Self {
      let shared = ::std::sync::Arc::new(#shared {
        remote: #core::RemoteQueue::new(),
        #(#shared_inits,)*
        running: ::core::sync::atomic::AtomicBool::new(false),
      });
      Self {
        #(#field_inits,)*
        local: #core::RingBuffer::new(),
        shared,
      }
    }
  }
}

fn worker_arms(def: &LoopDef, receiver: &ReceiverDef) -> Vec<TokenStream> {
  let core = krate();
  let shared = shared_ident(def);
  let env = thread_env_ident(def, receiver);
  let ty = &receiver.ty;
  receiver
    .receives
    .iter()
    .map(|event| {
      let variant = last_ident(event);
      quote! {
        #env::#variant(event) => {
          let mut dispatcher = #core::ThreadDispatcher::<#ty, #shared>::new(&*shared);
          #core::OnEvent::on_event(&mut *receiver.lock(), event, &mut dispatcher);
        }
      }
    })
    .collect()
}

fn start_fn(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let name_str = def.name.to_string();
  let clear_stops = topology::thread_receivers(def).into_iter().map(|receiver| {
    let inbox = inbox_ident(receiver);
    quote!(self.shared.#inbox.clear_stop();)
  });
  let spawns = topology::thread_receivers(def).into_iter().map(|receiver| {
    let field = &receiver.field;
    let field_str = field.to_string();
    let inbox = inbox_ident(receiver);
    let arms = worker_arms(def, receiver);
    quote! {
      {
        let receiver = self.#field.receiver();
        let shared = ::std::sync::Arc::clone(&self.shared);
        let worker = ::std::thread::Builder::new().name(#field_str.into()).spawn(move || {
          #core::__private::tracing::trace!(receiver = #field_str, "worker started");
          loop {
            let ::core::option::Option::Some(envelope) = shared.#inbox.pop_spin() else { break };
            match envelope {
              #(#arms)*
            }
          }
          #core::__private::tracing::trace!(receiver = #field_str, "worker stopped");
        })?;
        self.#field.attach(worker);
      }
    }
  });
  quote! {
    /// Launches the thread-hosted workers in declaration order. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates the OS error when a worker thread cannot be spawned;
    /// workers launched before the failure keep running.
    #vis fn start(&mut self) -> ::std::io::Result<()> {
      if self.shared.running.swap(true, ::core::sync::atomic::Ordering::AcqRel) {
        return ::core::result::Result::Ok(());
      }
      self.shared.remote.clear_stop();
      #(#clear_stops)*
      #(#spawns)*
      #core::__private::tracing::debug!(event_loop = #name_str, "event loop started");
      ::core::result::Result::Ok(())
    }
  }
}

fn stop_fn(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let name_str = def.name.to_string();
  let inbox_stops = topology::thread_receivers(def).into_iter().map(|receiver| {
    let inbox = inbox_ident(receiver);
    quote!(self.shared.#inbox.stop();)
  });
  let joins = topology::thread_receivers(def).into_iter().map(|receiver| {
    let field = &receiver.field;
    quote!(self.#field.join();)
  });
  quote! {
    /// Stops the mailbox and every inbox, then joins the workers in
    /// declaration order. Idempotent; queued events may be discarded.
    #vis fn stop(&mut self) {
      self.shared.running.store(false, ::core::sync::atomic::Ordering::Release);
      self.shared.remote.stop();
      #(#inbox_stops)*
      #(#joins)*
      #core::__private::tracing::debug!(event_loop = #name_str, "event loop stopped");
    }
  }
}

fn running_fn(def: &LoopDef) -> TokenStream {
  let vis = &def.vis;
  quote! {
    /// Whether the loop is between `start` and `stop`.
    #[must_use]
    #vis fn is_running(&self) -> bool {
      self.shared.running.load(::core::sync::atomic::Ordering::Acquire)
    }
  }
}

fn poll_fns(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let env = env_ident(def);
  let pop = if topology::needs_shared_side(def) {
    quote! {
      let Self { local, shared, .. } = self;
      #core::Mailbox::new(&mut *local, &shared.remote).try_pop()
    }
  } else {
    quote!(self.local.try_pop())
  };
  quote! {
    /// Pops the next mailbox event without dispatching it, draining the
    /// shared side first when the topology has one.
    #vis fn try_get_event(&mut self) -> ::core::option::Option<#env> {
      #pop
    }
  }
}

fn dispatch_fn(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let shared_ty = shared_ident(def);
  let env = env_ident(def);
  let universe = topology::loop_universe(def);
  let body = if universe.is_empty() {
    quote!(match envelope {})
  } else {
    let arms = universe.iter().map(|event| {
      let variant = last_ident(event);
      let consumers = topology::loop_consumers_for(def, event);
      let fields = consumers.iter().map(|consumer| &consumer.field);
      let calls = consumers.iter().enumerate().map(|(position, consumer)| {
        let field = &consumer.field;
        let ty = &consumer.ty;
        let payload = if position + 1 == consumers.len() {
          quote!(event)
        } else {
          quote!(::core::clone::Clone::clone(&event))
        };
        quote! {
          {
            let mut dispatcher = #core::LoopDispatcher::<#ty, #shared_ty>::new(&mut *local, &**shared);
            #core::OnEvent::on_event(#field, #payload, &mut dispatcher);
          }
        }
      });
      quote! {
        #env::#variant(event) => {
          let Self { #(#fields,)* local, shared, .. } = self;
          #(#calls)*
        }
      }
    });
    quote!(match envelope { #(#arms)* })
  };
  quote! {
    /// Runs the loop-side fan-out for one dequeued envelope: the first
    /// `k - 1` consumers receive a clone, the last receives the move.
    #vis fn dispatch_event(&mut self, envelope: #env) {
      #body
    }
  }
}

fn accessors(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let fns = def.receivers.iter().map(|receiver| {
    let field = &receiver.field;
    let ty = &receiver.ty;
    match receiver.mode {
      | Mode::LoopHosted => {
        let doc = format!("Borrows the `{field}` receiver.");
        quote! {
          #[doc = #doc]
          #[must_use]
          #vis fn #field(&self) -> &#ty {
            &self.#field
          }
        }
      },
      | Mode::ThreadHosted => {
        let doc = format!("Locks and borrows the `{field}` receiver.");
        quote! {
          #[doc = #doc]
          #[must_use]
          #vis fn #field(&self) -> #core::MutexGuard<'_, #ty> {
            self.#field.lock()
          }
        }
      },
    }
  });
  quote!(#(#fns)*)
}

fn inbox_consts(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let consts = topology::thread_receivers(def).into_iter().map(|receiver| {
    let field = &receiver.field;
    let upper = field.to_string().to_uppercase();
    let count_ident = format_ident!("{upper}_PRODUCER_COUNT");
    let kind_ident = format_ident!("{upper}_INBOX_KIND");
    let count = topology::producer_count(def, receiver);
    let kind = if count <= 1 {
      quote!(#core::InboxKind::SingleProducer)
    } else {
      quote!(#core::InboxKind::MultiProducer)
    };
    let count_doc = format!("Producer classes the topology counted for the `{field}` inbox.");
    let kind_doc = format!("Inbox implementation selected for `{field}`.");
    quote! {
      #[doc = #count_doc]
      #vis const #count_ident: usize = #count;
      #[doc = #kind_doc]
      #vis const #kind_ident: #core::InboxKind = #kind;
    }
  });
  quote!(#(#consts)*)
}

fn emitter_fn(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let shared = shared_ident(def);
  quote! {
    /// Returns a weak emit handle for the registered external producer `P`.
    ///
    /// The handle observes loop destruction: it then reports invalid and
    /// rejects emits instead of touching freed state.
    #[must_use]
    #vis fn emitter<P>(&self) -> #core::ExternalEmitter<P, #shared>
    where
      #shared: #core::RegisteredProducer<P>,
    {
      #core::ExternalEmitter::new(::std::sync::Arc::downgrade(&self.shared))
    }
  }
}

fn trait_impls(def: &LoopDef) -> TokenStream {
  let core = krate();
  let name = &def.name;
  let shared = shared_ident(def);
  let env = env_ident(def);
  let cap = def.mailbox_capacity;

  let inspects = def.receivers.iter().map(|receiver| {
    let field = &receiver.field;
    let ty = &receiver.ty;
    match receiver.mode {
      | Mode::LoopHosted => quote! {
        impl #core::Inspect<#ty> for #name {
          type Handle<'a> = &'a #ty where Self: 'a;

          fn inspect(&self) -> Self::Handle<'_> {
            &self.#field
          }
        }
      },
      | Mode::ThreadHosted => quote! {
        impl #core::Inspect<#ty> for #name {
          type Handle<'a> = #core::MutexGuard<'a, #ty> where Self: 'a;

          fn inspect(&self) -> Self::Handle<'_> {
            self.#field.lock()
          }
        }
      },
    }
  });

  let registrations = def.producers.iter().map(|producer| {
    let ty = &producer.ty;
    quote!(impl #core::RegisteredProducer<#ty> for #shared {})
  });

  quote! {
    impl #core::Wired for #shared {
      type Local = #core::RingBuffer<#env, #cap>;
    }

    impl #core::SharedState for #shared {
      fn is_running(&self) -> bool {
        self.running.load(::core::sync::atomic::Ordering::Acquire)
      }

      fn request_stop(&self) {
        self.running.store(false, ::core::sync::atomic::Ordering::Release);
        self.remote.stop();
      }
    }

    impl #core::HasShared for #name {
      type Shared = #shared;

      fn shared(&self) -> &::std::sync::Arc<#shared> {
        &self.shared
      }
    }

    impl #core::LoopControl for #name {
      fn start(&mut self) -> ::std::io::Result<()> {
        #name::start(self)
      }

      fn stop(&mut self) {
        #name::stop(self);
      }

      fn is_running(&self) -> bool {
        #name::is_running(self)
      }
    }

    impl #core::Pollable for #name {
      fn poll_once(&mut self) -> bool {
        match #name::try_get_event(self) {
          ::core::option::Option::Some(envelope) => {
            #name::dispatch_event(self, envelope);
            true
          },
          ::core::option::Option::None => false,
        }
      }

      fn poll_park(&mut self) -> bool {
        let envelope = {
          let Self { local, shared, .. } = self;
          #core::Mailbox::new(&mut *local, &shared.remote).wait_pop()
        };
        match envelope {
          ::core::option::Option::Some(envelope) => {
            #name::dispatch_event(self, envelope);
            true
          },
          ::core::option::Option::None => false,
        }
      }

      fn is_running(&self) -> bool {
        #name::is_running(self)
      }
    }

    impl ::core::ops::Drop for #name {
      fn drop(&mut self) {
        #name::stop(self);
      }
    }

    #(#inspects)*
    #(#registrations)*
  }
}

/// Routing destinations for one event, in delivery order: the mailbox side
/// first when any loop-hosted receiver consumes it, then each consuming
/// thread-hosted inbox in declaration order.
fn route_stmts(def: &LoopDef, event: &Path, mailbox_push: impl Fn(TokenStream) -> TokenStream) -> (Vec<TokenStream>, bool, bool) {
  let env = env_ident(def);
  let variant = last_ident(event);
  let to_mailbox = topology::has_loop_consumer(def, event);
  let threads = topology::thread_consumers_for(def, event);
  let total = usize::from(to_mailbox) + threads.len();

  let mut stmts = Vec::new();
  let mut position = 0;
  let payload = |position: usize| {
    if position + 1 == total {
      quote!(event)
    } else {
      quote!(::core::clone::Clone::clone(&event))
    }
  };
  if to_mailbox {
    let value = payload(position);
    stmts.push(mailbox_push(quote!(#env::#variant(#value))));
    position += 1;
  }
  let mut fallible = false;
  for consumer in threads {
    let inbox = inbox_ident(consumer);
    let tenv = thread_env_ident(def, consumer);
    let value = payload(position);
    stmts.push(quote! {
      if self.#inbox.push(#tenv::#variant(#value)).is_err() {
        dropped = true;
      }
    });
    fallible = true;
    position += 1;
  }
  (stmts, total > 0, fallible)
}

fn route_body(stmts: &[TokenStream], any_fallible: bool, event_name: &str) -> TokenStream {
  let core = krate();
  if any_fallible {
    quote! {
      let mut dropped = false;
      #(#stmts)*
      if dropped {
        #core::__private::tracing::warn!(event = #event_name, "destination queue full, delivery dropped");
        return ::core::result::Result::Err(#core::EmitError::Full);
      }
      ::core::result::Result::Ok(())
    }
  } else {
    quote! {
      #(#stmts)*
      ::core::result::Result::Ok(())
    }
  }
}

fn route_impls(def: &LoopDef) -> TokenStream {
  let core = krate();
  let shared = shared_ident(def);
  let env = env_ident(def);
  let cap = def.mailbox_capacity;
  let needs_shared = topology::needs_shared_side(def);

  let impls = topology::event_union(def).into_iter().map(|event| {
    let event_name = key(event);

    // Loop-origin routing: the mailbox push goes to the local ring and is
    // itself fallible.
    let (local_stmts, local_any, local_inbox_fallible) = route_stmts(def, event, |value| {
      quote! {
        if local.push(#value).is_err() {
          dropped = true;
        }
      }
    });
    let local_fallible = local_inbox_fallible || topology::has_loop_consumer(def, event);
    let local_param = if local_any { quote!(event) } else { quote!(_event) };
    let local_ring_param = if topology::has_loop_consumer(def, event) { quote!(local) } else { quote!(_local) };
    let local_body = route_body(&local_stmts, local_fallible && local_any, &event_name);
    let local_impl = quote! {
      impl #core::LocalRoute<#event> for #shared {
        fn route_local(
          &self,
          #local_ring_param: &mut #core::RingBuffer<#env, #cap>,
          #local_param: #event,
        ) -> ::core::result::Result<(), #core::EmitError> {
          #local_body
        }
      }
    };

    // Cross-thread routing exists only when it cannot strand loop-side
    // deliveries: with no shared side, remote emits of loop-consumed
    // events are rejected at compile time instead.
    let remote_impl = if !topology::has_loop_consumer(def, event) || needs_shared {
      let (remote_stmts, remote_any, remote_fallible) = route_stmts(def, event, |value| {
        quote!(self.remote.push(#value);)
      });
      let remote_param = if remote_any { quote!(event) } else { quote!(_event) };
      let remote_body = route_body(&remote_stmts, remote_fallible, &event_name);
      quote! {
        impl #core::RemoteRoute<#event> for #shared {
          fn route_remote(&self, #remote_param: #event) -> ::core::result::Result<(), #core::EmitError> {
            #remote_body
          }
        }
      }
    } else {
      quote!()
    };

    quote! {
      #local_impl
      #remote_impl
    }
  });

  quote!(#(#impls)*)
}

fn emit_impls(def: &LoopDef) -> TokenStream {
  let core = krate();
  let name = &def.name;
  let shared = shared_ident(def);

  let mut impls = Vec::new();

  for event in topology::event_union(def) {
    impls.push(quote! {
      impl #core::Emit<#event> for #name {
        fn emit(&mut self, event: #event) -> ::core::result::Result<(), #core::EmitError> {
          let Self { local, shared, .. } = self;
          #core::LocalRoute::route_local(&**shared, &mut *local, event)
        }
      }
    });
  }

  for receiver in &def.receivers {
    let ty = &receiver.ty;
    for event in &receiver.emits {
      impls.push(match receiver.mode {
        | Mode::LoopHosted => quote! {
          impl<'a> #core::Emit<#event> for #core::LoopDispatcher<'a, #ty, #shared> {
            fn emit(&mut self, event: #event) -> ::core::result::Result<(), #core::EmitError> {
              let (local, shared) = self.parts();
              #core::LocalRoute::route_local(shared, local, event)
            }
          }
        },
        | Mode::ThreadHosted => quote! {
          impl<'a> #core::Emit<#event> for #core::ThreadDispatcher<'a, #ty, #shared> {
            fn emit(&mut self, event: #event) -> ::core::result::Result<(), #core::EmitError> {
              #core::RemoteRoute::route_remote(self.shared(), event)
            }
          }
        },
      });
    }
  }

  for producer in &def.producers {
    let ty = &producer.ty;
    for event in &producer.emits {
      impls.push(quote! {
        impl #core::Emit<#event> for #core::ExternalEmitter<#ty, #shared> {
          fn emit(&mut self, event: #event) -> ::core::result::Result<(), #core::EmitError> {
            self.emit_via(event)
          }
        }
      });
    }
  }

  quote!(#(#impls)*)
}

fn dispatcher_aliases(def: &LoopDef) -> TokenStream {
  let core = krate();
  let vis = &def.vis;
  let name = &def.name;
  let shared = shared_ident(def);
  let aliases = def.receivers.iter().map(|receiver| {
    let ty = &receiver.ty;
    let alias = alias_ident(def, receiver);
    let doc = format!("Dispatcher handle passed to the `{}` receiver of [`{name}`].", receiver.field);
    match receiver.mode {
      | Mode::LoopHosted => quote! {
        #[doc = #doc]
        #vis type #alias<'a> = #core::LoopDispatcher<'a, #ty, #shared>;
      },
      | Mode::ThreadHosted => quote! {
        #[doc = #doc]
        #vis type #alias<'a> = #core::ThreadDispatcher<'a, #ty, #shared>;
      },
    }
  });
  quote!(#(#aliases)*)
}
