//! Test kinds exercising the failure paths of the strategies
//!
//! - `Sealed`: no construction path
//! - `Session`: carries a live handle the reflection layer cannot copy
//! - `Draft`: constructible but not marked for encoding
//! - `Order`: encodable root holding a `Draft`; its `DeepClone` forgets to
//!   fix up the nested reference
//! - `Lookalike`: reports the `Customer` kind but has a different layout

#![allow(dead_code)]

use graphclone::model::{node, NodeRef};
use graphclone::reflect::{FieldInfo, FieldRef, FieldType, FieldValue, FieldVisitor, Kind, KindRegistry, Reflect};
use graphclone::strategies::DeepClone;
use graphclone::CloneResult;
use serde::{Deserialize, Serialize};
use std::any::Any;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Registry of the sample kinds plus every test kind
pub fn test_registry() -> KindRegistry {
    let mut registry = graphclone::kind_registry();
    for kind in [&SEALED_KIND, &SESSION_KIND, &DRAFT_KIND, &ORDER_KIND] {
        registry.register(kind);
    }
    registry
}

fn visit_node<T: Reflect>(child: &Option<NodeRef<T>>, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
    match child {
        Some(child) => {
            let child = child.borrow();
            visit(FieldRef::Node(Some(&*child)))
        }
        None => visit(FieldRef::Node(None)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sealed {
    pub label: String,
}

pub static SEALED_KIND: Kind = Kind {
    name: "Sealed",
    fields: &[FieldInfo::new("label", FieldType::Text)],
    constructor: None,
    encodable: true,
};

impl Reflect for Sealed {
    fn kind(&self) -> &'static Kind {
        &SEALED_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "label" => visit(FieldRef::Text(&self.label)),
            _ => Err(SEALED_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        match name {
            "label" => self.label = value.into_text(&SEALED_KIND, name)?,
            _ => return Err(SEALED_KIND.mismatch(name)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Stand-in for an OS resource
#[derive(Debug, Default, PartialEq)]
pub struct SocketHandle(pub u32);

#[derive(Debug, Default, PartialEq)]
pub struct Session {
    pub user: String,
    pub socket: SocketHandle,
}

fn construct_session() -> Box<dyn Reflect> {
    Box::<Session>::default()
}

pub static SESSION_KIND: Kind = Kind {
    name: "Session",
    fields: &[
        FieldInfo::new("user", FieldType::Text),
        FieldInfo::new("socket", FieldType::Opaque("SocketHandle")),
    ],
    constructor: Some(construct_session),
    encodable: true,
};

impl Reflect for Session {
    fn kind(&self) -> &'static Kind {
        &SESSION_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "user" => visit(FieldRef::Text(&self.user)),
            _ => Err(SESSION_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        match name {
            "user" => self.user = value.into_text(&SESSION_KIND, name)?,
            _ => return Err(SESSION_KIND.mismatch(name)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub text: String,
}

fn construct_draft() -> Box<dyn Reflect> {
    Box::<Draft>::default()
}

pub static DRAFT_KIND: Kind = Kind {
    name: "Draft",
    fields: &[FieldInfo::new("text", FieldType::Text)],
    constructor: Some(construct_draft),
    encodable: false,
};

impl Reflect for Draft {
    fn kind(&self) -> &'static Kind {
        &DRAFT_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "text" => visit(FieldRef::Text(&self.text)),
            _ => Err(DRAFT_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        match name {
            "text" => self.text = value.into_text(&DRAFT_KIND, name)?,
            _ => return Err(DRAFT_KIND.mismatch(name)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl DeepClone for Draft {
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: String,
    pub draft: Option<NodeRef<Draft>>,
}

fn construct_order() -> Box<dyn Reflect> {
    Box::<Order>::default()
}

pub static ORDER_KIND: Kind = Kind {
    name: "Order",
    fields: &[
        FieldInfo::new("number", FieldType::Text),
        FieldInfo::new("draft", FieldType::Node("Draft")),
    ],
    constructor: Some(construct_order),
    encodable: true,
};

impl Reflect for Order {
    fn kind(&self) -> &'static Kind {
        &ORDER_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "number" => visit(FieldRef::Text(&self.number)),
            "draft" => visit_node(&self.draft, visit),
            _ => Err(ORDER_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        match name {
            "number" => self.number = value.into_text(&ORDER_KIND, name)?,
            "draft" => self.draft = value.into_node::<Draft>(&ORDER_KIND, name)?.map(node),
            _ => return Err(ORDER_KIND.mismatch(name)),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl DeepClone for Order {
    // Missing: copy.draft = deep_clone_child(&self.draft)
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

pub fn sample_order() -> Order {
    Order {
        number: "PO-1138".to_string(),
        draft: Some(node(Draft {
            text: "rush delivery".to_string(),
        })),
    }
}

/// Borrows the customer kind descriptor without being a `Customer`
#[derive(Debug, Clone, PartialEq)]
pub struct Lookalike {
    pub tag: u8,
}

impl Reflect for Lookalike {
    fn kind(&self) -> &'static Kind {
        &graphclone::model::CUSTOMER_KIND
    }

    fn visit_field(&self, name: &str, _visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        Err(self.kind().mismatch(name))
    }

    fn set_field(&mut self, name: &str, _value: FieldValue) -> CloneResult<()> {
        Err(self.kind().mismatch(name))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
