//! Runtime helpers called from compiled clone routines
//!
//! Compiled code only ever sees opaque node pointers. Every read and write of
//! a node goes through one of these `extern "C"` functions:
//!
//! - `gc_new_<kind>()` allocates a default node on the heap
//! - `gc_get_<kind>_<field>(src)` returns a pointer to a scalar field, or the
//!   nested node behind a reference field (null when the reference is empty)
//! - `gc_set_<kind>_<field>(dst, value)` copies a scalar into `dst`, or moves
//!   a freshly built child node into it
//!
//! The helpers are registered with the JIT by name through [`symbols`].

use crate::model::{node, Address, Customer, State};
use std::any::TypeId;
use std::ptr;

macro_rules! runtime_helpers {
    ($(
        $kind:ident => $new:ident {
            scalars { $($sfield:ident: $sty:ty => $sget:ident, $sset:ident;)* }
            nodes { $($nfield:ident: $nkind:ident => $nget:ident, $nset:ident;)* }
        }
    )*) => {
        $(
            /// # Safety
            /// The returned node must be released with `Box::from_raw` or
            /// handed to a `gc_set_*` helper.
            pub unsafe extern "C" fn $new() -> *mut $kind {
                Box::into_raw(Box::<$kind>::default())
            }

            $(
                /// # Safety
                /// `src` must point to a live node.
                pub unsafe extern "C" fn $sget(src: *const $kind) -> *const $sty {
                    &(*src).$sfield
                }

                /// # Safety
                /// `dst` must be a node from the matching `gc_new_*` helper and
                /// `value` must point to a live field of the same type.
                pub unsafe extern "C" fn $sset(dst: *mut $kind, value: *const $sty) {
                    (*dst).$sfield = (*value).clone();
                }
            )*

            $(
                /// # Safety
                /// `src` must point to a live node.
                pub unsafe extern "C" fn $nget(src: *const $kind) -> *const $nkind {
                    match &(*src).$nfield {
                        Some(child) => child.as_ptr() as *const $nkind,
                        None => ptr::null(),
                    }
                }

                /// # Safety
                /// `dst` must be a node from the matching `gc_new_*` helper.
                /// `child` is either null or an unowned node from `gc_new_*`;
                /// ownership moves into `dst`.
                pub unsafe extern "C" fn $nset(dst: *mut $kind, child: *mut $nkind) {
                    (*dst).$nfield = if child.is_null() {
                        None
                    } else {
                        Some(node(*Box::from_raw(child)))
                    };
                }
            )*
        )*

        /// Every helper symbol, ready to register with a JIT builder
        pub fn symbols() -> Vec<(&'static str, *const u8)> {
            vec![
                $(
                    (stringify!($new), $new as *const u8),
                    $(
                        (stringify!($sget), $sget as *const u8),
                        (stringify!($sset), $sset as *const u8),
                    )*
                    $(
                        (stringify!($nget), $nget as *const u8),
                        (stringify!($nset), $nset as *const u8),
                    )*
                )*
            ]
        }

        /// Concrete Rust type the helpers of a kind read and write
        pub fn node_type(kind: &str) -> Option<TypeId> {
            match kind {
                $(stringify!($kind) => Some(TypeId::of::<$kind>()),)*
                _ => None,
            }
        }
    };
}

runtime_helpers! {
    Customer => gc_new_customer {
        scalars {
            id: String => gc_get_customer_id, gc_set_customer_id;
            first_name: String => gc_get_customer_first_name, gc_set_customer_first_name;
            last_name: String => gc_get_customer_last_name, gc_set_customer_last_name;
        }
        nodes {
            address: Address => gc_get_customer_address, gc_set_customer_address;
        }
    }
    Address => gc_new_address {
        scalars {
            street: String => gc_get_address_street, gc_set_address_street;
            city: String => gc_get_address_city, gc_set_address_city;
        }
        nodes {
            state: State => gc_get_address_state, gc_set_address_state;
        }
    }
    State => gc_new_state {
        scalars {
            name: String => gc_get_state_name, gc_set_state_name;
            code: String => gc_get_state_code, gc_set_state_code;
        }
        nodes {}
    }
}

/// Name of the allocation helper for a kind
pub fn new_helper(kind: &str) -> String {
    format!("gc_new_{}", kind.to_lowercase())
}

/// Name of the read helper for a kind's field
pub fn get_helper(kind: &str, field: &str) -> String {
    format!("gc_get_{}_{}", kind.to_lowercase(), field)
}

/// Name of the write helper for a kind's field
pub fn set_helper(kind: &str, field: &str) -> String {
    format!("gc_set_{}_{}", kind.to_lowercase(), field)
}

/// Resolve a helper by symbol name
pub fn lookup(name: &str) -> Option<*const u8> {
    symbols()
        .into_iter()
        .find(|(symbol, _)| *symbol == name)
        .map(|(_, address)| address)
}
