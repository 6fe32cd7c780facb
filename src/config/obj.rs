//! Object (item) definitions

use super::ConfigType;
use crate::buffer::{ByteReader, ByteWriter};
use crate::error::Result;

/// One object (inventory item) definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjType {
    id: u16,
    /// Model id (opcode 1).
    pub model: u16,
    /// Item name (opcode 2).
    pub name: Option<String>,
    /// Examine text (opcode 3).
    pub desc: Option<String>,
    /// Inventory icon zoom (opcode 4).
    pub zoom2d: u16,
    /// Inventory icon rotation (opcodes 5, 6).
    pub xan2d: u16,
    pub yan2d: u16,
    /// Inventory icon translation (opcodes 7, 8).
    pub xof2d: i16,
    pub yof2d: i16,
    /// Set by opcode 11: quantities merge into one stack.
    pub stackable: bool,
    /// Base value in coins (opcode 12).
    pub cost: i32,
    /// Set by opcode 16: members-world only.
    pub members: bool,
    /// Worn models and vertical offsets (opcodes 23-26).
    pub manwear: Option<u16>,
    pub manwear_offset: i8,
    pub manwear2: Option<u16>,
    pub womanwear: Option<u16>,
    pub womanwear_offset: i8,
    pub womanwear2: Option<u16>,
    /// Ground right-click options (opcodes 30-34).
    pub ops: [Option<String>; 5],
    /// Inventory right-click options (opcodes 35-39).
    pub iops: [Option<String>; 5],
    /// Symbolic name embedded by the packer (opcode 250), if any.
    pub debugname: Option<String>,
}

impl ConfigType for ObjType {
    const CATEGORY: &'static str = "obj";
    const ENTRY_NAME: &'static str = "obj.dat";

    fn with_id(id: u16) -> Self {
        Self {
            id,
            model: 0,
            name: None,
            desc: None,
            zoom2d: 2000,
            xan2d: 0,
            yan2d: 0,
            xof2d: 0,
            yof2d: 0,
            stackable: false,
            cost: 1,
            members: false,
            manwear: None,
            manwear_offset: 0,
            manwear2: None,
            womanwear: None,
            womanwear_offset: 0,
            womanwear2: None,
            ops: Default::default(),
            iops: Default::default(),
            debugname: None,
        }
    }

    fn id(&self) -> u16 {
        self.id
    }

    fn decode(&mut self, opcode: u8, buf: &mut ByteReader<'_>) -> Result<()> {
        match opcode {
            1 => self.model = buf.read_u16()?,
            2 => self.name = Some(buf.read_cstr()?),
            3 => self.desc = Some(buf.read_cstr()?),
            4 => self.zoom2d = buf.read_u16()?,
            5 => self.xan2d = buf.read_u16()?,
            6 => self.yan2d = buf.read_u16()?,
            7 => self.xof2d = buf.read_i16()?,
            8 => self.yof2d = buf.read_i16()?,
            11 => self.stackable = true,
            12 => self.cost = buf.read_i32()?,
            16 => self.members = true,
            23 => {
                self.manwear = Some(buf.read_u16()?);
                self.manwear_offset = buf.read_i8()?;
            }
            24 => self.manwear2 = Some(buf.read_u16()?),
            25 => {
                self.womanwear = Some(buf.read_u16()?);
                self.womanwear_offset = buf.read_i8()?;
            }
            26 => self.womanwear2 = Some(buf.read_u16()?),
            30..=34 => self.ops[usize::from(opcode) - 30] = Some(buf.read_cstr()?),
            35..=39 => self.iops[usize::from(opcode) - 35] = Some(buf.read_cstr()?),
            250 => self.debugname = Some(buf.read_cstr()?),
            _ => return Err(self.unrecognized(opcode, buf)),
        }
        Ok(())
    }

    fn encode(&self, out: &mut ByteWriter) {
        if self.model != 0 {
            out.write_u8(1);
            out.write_u16(self.model);
        }
        if let Some(name) = &self.name {
            out.write_u8(2);
            out.write_cstr(name);
        }
        if let Some(desc) = &self.desc {
            out.write_u8(3);
            out.write_cstr(desc);
        }
        if self.zoom2d != 2000 {
            out.write_u8(4);
            out.write_u16(self.zoom2d);
        }
        if self.xan2d != 0 {
            out.write_u8(5);
            out.write_u16(self.xan2d);
        }
        if self.yan2d != 0 {
            out.write_u8(6);
            out.write_u16(self.yan2d);
        }
        if self.xof2d != 0 {
            out.write_u8(7);
            out.write_i16(self.xof2d);
        }
        if self.yof2d != 0 {
            out.write_u8(8);
            out.write_i16(self.yof2d);
        }
        if self.stackable {
            out.write_u8(11);
        }
        if self.cost != 1 {
            out.write_u8(12);
            out.write_i32(self.cost);
        }
        if self.members {
            out.write_u8(16);
        }
        if let Some(manwear) = self.manwear {
            out.write_u8(23);
            out.write_u16(manwear);
            out.write_i8(self.manwear_offset);
        }
        if let Some(manwear2) = self.manwear2 {
            out.write_u8(24);
            out.write_u16(manwear2);
        }
        if let Some(womanwear) = self.womanwear {
            out.write_u8(25);
            out.write_u16(womanwear);
            out.write_i8(self.womanwear_offset);
        }
        if let Some(womanwear2) = self.womanwear2 {
            out.write_u8(26);
            out.write_u16(womanwear2);
        }
        for (i, op) in self.ops.iter().enumerate() {
            if let Some(op) = op {
                out.write_u8(30 + i as u8);
                out.write_cstr(op);
            }
        }
        for (i, iop) in self.iops.iter().enumerate() {
            if let Some(iop) = iop {
                out.write_u8(35 + i as u8);
                out.write_cstr(iop);
            }
        }
        if let Some(debugname) = &self.debugname {
            out.write_u8(250);
            out.write_cstr(debugname);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Registry;
    use crate::error::Error;

    fn bronze_dagger() -> ObjType {
        let mut obj = ObjType::with_id(0);
        obj.model = 2401;
        obj.name = Some("Bronze dagger".to_string());
        obj.desc = Some("A short sharp blade.".to_string());
        obj.cost = 10;
        obj.members = false;
        obj.manwear = Some(491);
        obj.manwear_offset = -4;
        obj.womanwear = Some(620);
        obj.iops[1] = Some("Wield".to_string());
        obj.debugname = Some("bronze_dagger".to_string());
        obj
    }

    #[test]
    fn roundtrip() {
        let mut coins = ObjType::with_id(1);
        coins.model = 2322;
        coins.name = Some("Coins".to_string());
        coins.stackable = true;
        coins.cost = 1;

        let objs = vec![bronze_dagger(), coins];
        let packed = Registry::pack(&objs).unwrap();
        let registry = Registry::<ObjType>::load(&packed).unwrap();
        assert_eq!(registry.records(), &objs[..]);
    }

    #[test]
    fn signed_offsets_survive() {
        let mut obj = ObjType::with_id(0);
        obj.xof2d = -120;
        obj.yof2d = 77;
        obj.manwear = Some(1);
        obj.manwear_offset = -128;

        let packed = Registry::pack(std::slice::from_ref(&obj)).unwrap();
        let registry = Registry::<ObjType>::load(&packed).unwrap();
        assert_eq!(registry.get(0).unwrap(), &obj);
    }

    #[test]
    fn op_slots_map_from_opcode_range() {
        // opcode 33 is ground op slot 3, opcode 35 is inventory op slot 0
        let data = [0x00, 0x01, 33, b'T', b'a', b'k', b'e', 0, 35, b'E', b'a', b't', 0, 0];
        let registry = Registry::<ObjType>::load(&data).unwrap();
        let obj = registry.get(0).unwrap();
        assert_eq!(obj.ops[3].as_deref(), Some("Take"));
        assert_eq!(obj.iops[0].as_deref(), Some("Eat"));
    }

    #[test]
    fn unrecognized_opcode_is_fatal() {
        let data = [0x00, 0x01, 99, 0];
        let err = Registry::<ObjType>::load(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedOpcode {
                category: "obj",
                opcode: 99,
                ..
            }
        ));
    }
}
