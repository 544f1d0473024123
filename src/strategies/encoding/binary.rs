//! Reflection-driven binary codec
//!
//! Layout (little-endian):
//!
//! ```text
//! blob   := MAGIC node
//! node   := str(kind) u16(field_count) field*
//! field  := str(name) tag payload
//! tag    := 0 text | 1 integer | 2 boolean | 3 null node | 4 node
//! str    := u32(len) utf8-bytes
//! ```
//!
//! Every node in the graph must carry the eligibility marker, and opaque
//! fields cannot be written at all. Either condition fails the whole encode
//! with `NotEligibleForEncoding`; the codec never emits a partial graph.

use super::{require_encodable, Codec};
use crate::error::{CloneError, CloneResult};
use crate::reflect::{downcast, FieldRef, FieldType, FieldValue, KindRegistry, Reflect};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

const MAGIC: &[u8; 4] = b"GCB1";

const TAG_TEXT: u8 = 0;
const TAG_INTEGER: u8 = 1;
const TAG_BOOLEAN: u8 = 2;
const TAG_NULL: u8 = 3;
const TAG_NODE: u8 = 4;

/// Binary codec; decoding resolves kind names through a registry
#[derive(Debug, Clone)]
pub struct BinaryCodec {
    registry: KindRegistry,
}

impl BinaryCodec {
    pub fn new(registry: KindRegistry) -> Self {
        Self { registry }
    }

    /// Encode a type-erased graph
    pub fn encode_node(&self, source: &dyn Reflect) -> CloneResult<Vec<u8>> {
        let mut out = Vec::with_capacity(128);
        out.write_all(MAGIC)?;
        write_node(&mut out, source)?;
        log::trace!("encoded {} as {} binary bytes", source.kind().name, out.len());
        Ok(out)
    }

    /// Decode a blob produced by [`encode_node`](Self::encode_node)
    pub fn decode_node(&self, blob: &[u8]) -> CloneResult<Box<dyn Reflect>> {
        let mut cursor = Cursor::new(blob);
        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(CloneError::Decode("missing binary header".to_string()));
        }
        let node = self.read_node(&mut cursor)?;
        if (cursor.position() as usize) != blob.len() {
            return Err(CloneError::Decode(format!(
                "{} trailing bytes after graph",
                blob.len() - cursor.position() as usize
            )));
        }
        Ok(node)
    }

    fn read_node(&self, cursor: &mut Cursor<&[u8]>) -> CloneResult<Box<dyn Reflect>> {
        let kind_name = read_str(cursor)?;
        let kind = self
            .registry
            .lookup(&kind_name)
            .ok_or_else(|| CloneError::Decode(format!("unknown kind '{}'", kind_name)))?;
        require_encodable(kind)?;
        let mut node = kind.construct()?;

        let field_count = cursor.read_u16::<LittleEndian>()?;
        for _ in 0..field_count {
            let name = read_str(cursor)?;
            let value = match cursor.read_u8()? {
                TAG_TEXT => FieldValue::Text(read_str(cursor)?),
                TAG_INTEGER => FieldValue::Integer(cursor.read_i64::<LittleEndian>()?),
                TAG_BOOLEAN => FieldValue::Boolean(cursor.read_u8()? != 0),
                TAG_NULL => FieldValue::Node(None),
                TAG_NODE => FieldValue::Node(Some(self.read_node(cursor)?)),
                tag => {
                    return Err(CloneError::Decode(format!(
                        "bad tag {} for field '{}.{}'",
                        tag, kind.name, name
                    )))
                }
            };
            node.set_field(&name, value)?;
        }
        Ok(node)
    }
}

/// Strings carry a `u32` length; longer ones cannot be encoded
fn length_prefix(len: usize) -> CloneResult<u32> {
    u32::try_from(len)
        .map_err(|_| CloneError::Decode(format!("string of {} bytes exceeds the u32 length prefix", len)))
}

fn write_str(out: &mut Vec<u8>, text: &str) -> CloneResult<()> {
    out.write_u32::<LittleEndian>(length_prefix(text.len())?)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn read_str(cursor: &mut Cursor<&[u8]>) -> CloneResult<String> {
    let len = cursor.read_u32::<LittleEndian>()? as usize;
    let remaining = cursor.get_ref().len() - cursor.position() as usize;
    if len > remaining {
        return Err(CloneError::Decode(format!(
            "string of {} bytes overruns blob ({} left)",
            len, remaining
        )));
    }
    let mut bytes = vec![0u8; len];
    cursor.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| CloneError::Decode(e.to_string()))
}

fn write_node(out: &mut Vec<u8>, node: &dyn Reflect) -> CloneResult<()> {
    let kind = node.kind();
    require_encodable(kind)?;
    write_str(out, kind.name)?;
    out.write_u16::<LittleEndian>(kind.fields.len() as u16)?;

    for field in kind.fields {
        if let FieldType::Opaque(type_name) = field.ty {
            return Err(CloneError::NotEligibleForEncoding {
                kind: type_name.to_string(),
            });
        }
        write_str(out, field.name)?;
        node.visit_field(field.name, &mut |field_ref| match field_ref {
            FieldRef::Text(text) => {
                out.write_u8(TAG_TEXT)?;
                write_str(out, text)
            }
            FieldRef::Integer(value) => {
                out.write_u8(TAG_INTEGER)?;
                Ok(out.write_i64::<LittleEndian>(value)?)
            }
            FieldRef::Boolean(value) => {
                out.write_u8(TAG_BOOLEAN)?;
                Ok(out.write_u8(value as u8)?)
            }
            FieldRef::Node(None) => Ok(out.write_u8(TAG_NULL)?),
            FieldRef::Node(Some(child)) => {
                out.write_u8(TAG_NODE)?;
                write_node(out, child)
            }
        })?;
    }
    Ok(())
}

impl<T: Reflect> Codec<T> for BinaryCodec {
    type Blob = Vec<u8>;

    fn encode(&self, source: &T) -> CloneResult<Vec<u8>> {
        self.encode_node(source)
    }

    fn decode(&self, blob: Vec<u8>) -> CloneResult<T> {
        downcast::<T>(self.decode_node(&blob)?)
    }
}
