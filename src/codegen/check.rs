//! Semantic validation of a parsed routine against the kind registry
//!
//! A routine that passes these checks lowers to code that only ever copies
//! scalars and builds fresh nested nodes. Anything that would share a node
//! between source and clone is rejected here.

use crate::ast::{FieldExpr, Path, Record, Routine};
use crate::error::{CloneError, CloneResult};
use crate::reflect::{FieldType, Kind, KindRegistry};
use std::collections::HashSet;

/// Validate a routine, returning the kind it clones
pub fn check_routine(routine: &Routine, registry: &KindRegistry) -> CloneResult<&'static Kind> {
    if routine.param_kind != routine.return_kind || routine.body.kind != routine.param_kind {
        return Err(semantic_error(format!(
            "routine '{}' must take and return the same kind (takes '{}', returns '{}', builds '{}')",
            routine.name, routine.param_kind, routine.return_kind, routine.body.kind
        )));
    }
    let kind = resolve_kind(registry, &routine.param_kind, routine)?;

    let checker = Checker { registry, routine };
    checker.check_record(&routine.body, kind, &[])?;
    Ok(kind)
}

struct Checker<'a> {
    registry: &'a KindRegistry,
    routine: &'a Routine,
}

impl<'a> Checker<'a> {
    /// `source` is the field path, below the parameter, the record is built from
    fn check_record(&self, record: &Record, kind: &'static Kind, source: &[String]) -> CloneResult<()> {
        let mut seen = HashSet::new();
        for init in &record.fields {
            if !seen.insert(init.name.as_str()) {
                return Err(semantic_error(format!(
                    "field '{}' initialized twice at {}",
                    init.name, init.position
                )));
            }

            let Some(info) = kind.field(&init.name) else {
                return Err(semantic_error(format!(
                    "kind '{}' has no field '{}' at {}",
                    kind.name, init.name, init.position
                )));
            };

            match (info.ty, &init.value) {
                (FieldType::Opaque(type_name), _) => {
                    return Err(semantic_error(format!(
                        "field '{}.{}' has type '{}' which cannot be copied",
                        kind.name, init.name, type_name
                    )));
                }
                (ty, FieldExpr::Path(path)) if ty.is_scalar() => {
                    self.check_scalar_path(path, kind, ty, source)?;
                }
                (FieldType::Node(child_kind), FieldExpr::Record(child)) => {
                    if child.kind != child_kind {
                        return Err(semantic_error(format!(
                            "field '{}.{}' holds '{}', not '{}' at {}",
                            kind.name, init.name, child_kind, child.kind, child.position
                        )));
                    }
                    let child_kind = resolve_kind(self.registry, child_kind, self.routine)?;
                    let mut child_source = source.to_vec();
                    child_source.push(init.name.clone());
                    self.check_record(child, child_kind, &child_source)?;
                }
                (FieldType::Node(_), FieldExpr::Null) => {}
                (FieldType::Node(_), FieldExpr::Path(path)) => {
                    return Err(semantic_error(format!(
                        "reference field '{}.{}' cannot copy '{}' by path; build a new node instead",
                        kind.name, init.name, path
                    )));
                }
                (_, _) => {
                    return Err(semantic_error(format!(
                        "field '{}.{}' needs a source path at {}",
                        kind.name, init.name, init.position
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_scalar_path(
        &self,
        path: &Path,
        kind: &'static Kind,
        ty: FieldType,
        source: &[String],
    ) -> CloneResult<()> {
        if path.root != self.routine.param {
            return Err(semantic_error(format!(
                "path '{}' must start at parameter '{}'",
                path, self.routine.param
            )));
        }
        if path.parent() != source {
            return Err(semantic_error(format!(
                "path '{}' does not read from the node being copied at {}",
                path, path.position
            )));
        }
        let Some(leaf) = path.leaf() else {
            return Err(semantic_error(format!("path '{}' names no field", path)));
        };
        match kind.field(leaf) {
            Some(source_field) if source_field.ty == ty => Ok(()),
            Some(_) => Err(semantic_error(format!(
                "path '{}' has a different type than the field it initializes",
                path
            ))),
            None => Err(semantic_error(format!(
                "kind '{}' has no field '{}' at {}",
                kind.name, leaf, path.position
            ))),
        }
    }
}

fn resolve_kind(registry: &KindRegistry, name: &str, routine: &Routine) -> CloneResult<&'static Kind> {
    registry.lookup(name).ok_or_else(|| {
        semantic_error(format!(
            "routine '{}' refers to unknown kind '{}'",
            routine.name, name
        ))
    })
}

fn semantic_error(message: String) -> CloneError {
    CloneError::CompilationError(message)
}
