//! Sample domain model: a three-level customer record
//!
//! `Customer` → `Address` → `State`, one instance of each, no sharing and no
//! cycles. Reference fields are [`NodeRef`]s so that node identity is
//! observable: a clone that shares a nested node with its source can be
//! detected with `Rc::ptr_eq` and shows mutation leaking across the two.
//!
//! The derived `Clone` on each kind is the flat member-wise copy: scalars are
//! duplicated, references are shared.

use crate::error::CloneResult;
use crate::reflect::{FieldInfo, FieldRef, FieldType, FieldValue, FieldVisitor, Kind, KindRegistry, Reflect};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable reference to a nested node
pub type NodeRef<T> = Rc<RefCell<T>>;

/// Wrap a node so it can be referenced from a parent
pub fn node<T>(value: T) -> NodeRef<T> {
    Rc::new(RefCell::new(value))
}

/// Root of the sample graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<NodeRef<Address>>,
}

/// Middle level of the sample graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: Option<NodeRef<State>>,
}

/// Leaf of the sample graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub code: String,
}

/// Build the fixed sample graph every strategy is measured against
pub fn create_sample_graph() -> Customer {
    Customer {
        id: "Customer1".to_string(),
        first_name: "Johnny".to_string(),
        last_name: "Five".to_string(),
        address: Some(node(Address {
            street: "197 Hume Ave".to_string(),
            city: "Astoria".to_string(),
            state: Some(node(State {
                name: "Oregon".to_string(),
                code: "OR".to_string(),
            })),
        })),
    }
}

/// Registry of the sample kinds, created once at startup
pub fn kind_registry() -> KindRegistry {
    KindRegistry::with_kinds(&[&CUSTOMER_KIND, &ADDRESS_KIND, &STATE_KIND])
}

fn construct_customer() -> Box<dyn Reflect> {
    Box::<Customer>::default()
}

fn construct_address() -> Box<dyn Reflect> {
    Box::<Address>::default()
}

fn construct_state() -> Box<dyn Reflect> {
    Box::<State>::default()
}

pub static CUSTOMER_KIND: Kind = Kind {
    name: "Customer",
    fields: &[
        FieldInfo::new("id", FieldType::Text),
        FieldInfo::new("first_name", FieldType::Text),
        FieldInfo::new("last_name", FieldType::Text),
        FieldInfo::new("address", FieldType::Node("Address")),
    ],
    constructor: Some(construct_customer),
    encodable: true,
};

pub static ADDRESS_KIND: Kind = Kind {
    name: "Address",
    fields: &[
        FieldInfo::new("street", FieldType::Text),
        FieldInfo::new("city", FieldType::Text),
        FieldInfo::new("state", FieldType::Node("State")),
    ],
    constructor: Some(construct_address),
    encodable: true,
};

pub static STATE_KIND: Kind = Kind {
    name: "State",
    fields: &[
        FieldInfo::new("name", FieldType::Text),
        FieldInfo::new("code", FieldType::Text),
    ],
    constructor: Some(construct_state),
    encodable: true,
};

/// Lend a nested node to a visitor through its `RefCell`
fn visit_node<T: Reflect>(child: &Option<NodeRef<T>>, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
    match child {
        Some(child) => {
            let child = child.borrow();
            visit(FieldRef::Node(Some(&*child)))
        }
        None => visit(FieldRef::Node(None)),
    }
}

impl Reflect for Customer {
    fn kind(&self) -> &'static Kind {
        &CUSTOMER_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "id" => visit(FieldRef::Text(&self.id)),
            "first_name" => visit(FieldRef::Text(&self.first_name)),
            "last_name" => visit(FieldRef::Text(&self.last_name)),
            "address" => visit_node(&self.address, visit),
            _ => Err(CUSTOMER_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        let kind = &CUSTOMER_KIND;
        match name {
            "id" => self.id = value.into_text(kind, name)?,
            "first_name" => self.first_name = value.into_text(kind, name)?,
            "last_name" => self.last_name = value.into_text(kind, name)?,
            "address" => self.address = value.into_node::<Address>(kind, name)?.map(node),
            _ => return Err(kind.mismatch(name)),
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

impl Reflect for Address {
    fn kind(&self) -> &'static Kind {
        &ADDRESS_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "street" => visit(FieldRef::Text(&self.street)),
            "city" => visit(FieldRef::Text(&self.city)),
            "state" => visit_node(&self.state, visit),
            _ => Err(ADDRESS_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        let kind = &ADDRESS_KIND;
        match name {
            "street" => self.street = value.into_text(kind, name)?,
            "city" => self.city = value.into_text(kind, name)?,
            "state" => self.state = value.into_node::<State>(kind, name)?.map(node),
            _ => return Err(kind.mismatch(name)),
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

impl Reflect for State {
    fn kind(&self) -> &'static Kind {
        &STATE_KIND
    }

    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()> {
        match name {
            "name" => visit(FieldRef::Text(&self.name)),
            "code" => visit(FieldRef::Text(&self.code)),
            _ => Err(STATE_KIND.mismatch(name)),
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()> {
        let kind = &STATE_KIND;
        match name {
            "name" => self.name = value.into_text(kind, name)?,
            "code" => self.code = value.into_text(kind, name)?,
            _ => return Err(kind.mismatch(name)),
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
