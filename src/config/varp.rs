//! Player variable (varp) definitions

use super::{ConfigType, Registry};
use crate::buffer::{ByteReader, ByteWriter};
use crate::error::Result;

/// One player variable definition.
///
/// A varp is a numbered server-side variable slot; these records describe
/// each slot's scope, type, and transmission behavior. Some field names
/// (`code3`, `code7`, `code8`) keep the numbering of the original data,
/// whose purpose was never given a symbolic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarpType {
    id: u16,
    /// Variable scope (opcode 1).
    pub scope: u8,
    /// Variable type (opcode 2).
    pub vartype: u8,
    /// Flag opcode 3; also feeds the [`code3_ids`] side index.
    pub code3: bool,
    /// Cleared by opcode 4; set by default.
    pub protect: bool,
    /// Client-side binding code (opcode 5).
    pub clientcode: u16,
    /// Unnamed 32-bit field (opcode 7).
    pub code7: u32,
    /// Set by opcode 6: the value is sent to the client.
    pub transmit: bool,
    /// Flag opcode 8.
    pub code8: bool,
    /// Symbolic name embedded by the packer (opcode 10), if any.
    pub debugname: Option<String>,
}

impl ConfigType for VarpType {
    const CATEGORY: &'static str = "varp";
    const ENTRY_NAME: &'static str = "varp.dat";

    fn with_id(id: u16) -> Self {
        Self {
            id,
            scope: 0,
            vartype: 0,
            code3: false,
            protect: true,
            clientcode: 0,
            code7: 0,
            transmit: false,
            code8: false,
            debugname: None,
        }
    }

    fn id(&self) -> u16 {
        self.id
    }

    fn decode(&mut self, opcode: u8, buf: &mut ByteReader<'_>) -> Result<()> {
        match opcode {
            1 => self.scope = buf.read_u8()?,
            2 => self.vartype = buf.read_u8()?,
            3 => self.code3 = true,
            4 => self.protect = false,
            5 => self.clientcode = buf.read_u16()?,
            6 => self.transmit = true,
            7 => self.code7 = buf.read_u32()?,
            8 => self.code8 = true,
            10 => self.debugname = Some(buf.read_cstr()?),
            _ => return Err(self.unrecognized(opcode, buf)),
        }
        Ok(())
    }

    fn encode(&self, out: &mut ByteWriter) {
        if self.scope != 0 {
            out.write_u8(1);
            out.write_u8(self.scope);
        }
        if self.vartype != 0 {
            out.write_u8(2);
            out.write_u8(self.vartype);
        }
        if self.code3 {
            out.write_u8(3);
        }
        if !self.protect {
            out.write_u8(4);
        }
        if self.clientcode != 0 {
            out.write_u8(5);
            out.write_u16(self.clientcode);
        }
        if self.transmit {
            out.write_u8(6);
        }
        if self.code7 != 0 {
            out.write_u8(7);
            out.write_u32(self.code7);
        }
        if self.code8 {
            out.write_u8(8);
        }
        if let Some(debugname) = &self.debugname {
            out.write_u8(10);
            out.write_cstr(debugname);
        }
    }
}

/// Ids of every varp with `code3` set, in decode (id) order.
///
/// The original decoder appended to this list as a side effect of opcode 3;
/// deriving it after the full load gives the same ordering with clearer
/// ownership, and no partially-built list when a load aborts.
#[must_use]
pub fn code3_ids(registry: &Registry<VarpType>) -> Vec<u16> {
    registry
        .iter()
        .filter(|varp| varp.code3)
        .map(VarpType::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::buffer::ByteWriter;
    use crate::error::Error;

    #[test]
    fn scenario_two_records() {
        // count = 2, record 0 = [1, 5][0], record 1 = [2, 7][3][0]
        let data = [0x00, 0x02, 1, 5, 0, 2, 7, 3, 0];
        let registry = Registry::<VarpType>::load(&data).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().scope, 5);
        assert_eq!(registry.get(1).unwrap().vartype, 7);
        assert!(registry.get(1).unwrap().code3);
        assert_eq!(code3_ids(&registry), vec![1]);
    }

    #[test]
    fn terminator_splits_back_to_back_records() {
        // Record 0 must stop at its terminator; the clientcode opcode that
        // follows belongs to record 1.
        let data = [0x00, 0x02, 1, 9, 0, 5, 0x12, 0x34, 0];
        let registry = Registry::<VarpType>::load(&data).unwrap();
        assert_eq!(registry.get(0).unwrap().scope, 9);
        assert_eq!(registry.get(0).unwrap().clientcode, 0);
        assert_eq!(registry.get(1).unwrap().clientcode, 0x1234);
    }

    #[test]
    fn declared_count_short_of_records_is_corrupt() {
        let data = [0x00, 0x03, 1, 5, 0, 3, 0];
        let err = Registry::<VarpType>::load(&data).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive { .. }));
    }

    #[test]
    fn unrecognized_opcode_is_fatal() {
        let data = [0x00, 0x01, 200, 1, 0];
        let err = Registry::<VarpType>::load(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedOpcode {
                category: "varp",
                opcode: 200,
                id: 0
            }
        ));
    }

    #[test]
    fn unknown_id_lookup_fails() {
        let registry = Registry::<VarpType>::load(&[0x00, 0x01, 0]).unwrap();
        let err = registry.get(1).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownId {
                category: "varp",
                id: 1,
                count: 1
            }
        ));
    }

    #[test]
    fn roundtrip() {
        let mut varps = Vec::new();
        for id in 0..4u16 {
            let mut varp = VarpType::with_id(id);
            varp.scope = id as u8;
            varp.vartype = 2;
            varp.code3 = id % 2 == 1;
            varp.protect = id != 3;
            varp.clientcode = id * 100;
            varp.code7 = u32::from(id) << 16;
            varp.transmit = id == 2;
            varp.debugname = Some(format!("varp_{id}"));
            varps.push(varp);
        }
        let packed = Registry::pack(&varps).unwrap();
        let registry = Registry::<VarpType>::load(&packed).unwrap();
        assert_eq!(registry.records(), &varps[..]);
        assert_eq!(code3_ids(&registry), vec![1, 3]);
    }

    #[test]
    fn empty_record_encodes_to_bare_terminator() {
        let varp = VarpType::with_id(0);
        let mut out = ByteWriter::new();
        varp.encode(&mut out);
        assert!(out.is_empty());
    }
}
