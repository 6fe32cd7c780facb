//! Location (scenery) definitions

use super::ConfigType;
use crate::buffer::{ByteReader, ByteWriter};
use crate::error::Result;

/// One location (map scenery) definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocType {
    id: u16,
    /// Model id and shape pairs (opcode 1: count byte, then u16 + u8 per
    /// model).
    pub models: Vec<(u16, u8)>,
    /// Location name (opcode 2).
    pub name: Option<String>,
    /// Examine text (opcode 3).
    pub desc: Option<String>,
    /// Footprint in tiles (opcodes 14, 15).
    pub width: u8,
    pub length: u8,
    /// Cleared by opcode 17: the loc does not block walking.
    pub blockwalk: bool,
    /// Cleared by opcode 18: the loc does not block ranged paths.
    pub blockrange: bool,
    /// Opcode 19: whether the loc is interactable; unset means the client
    /// decides from the presence of ops.
    pub active: Option<bool>,
    /// Set by opcode 21: the model follows the terrain slope.
    pub hillskew: bool,
    /// Set by opcode 22: the model shares lighting with the terrain.
    pub sharelight: bool,
    /// Set by opcode 23: the loc occludes geometry behind it.
    pub occlude: bool,
    /// Decoration inset from the wall, 16 = flush (opcode 28).
    pub wallwidth: u8,
    /// Right-click options (opcodes 30-34).
    pub ops: [Option<String>; 5],
    /// Vertical model offset (opcode 39).
    pub offset: i8,
    /// Symbolic name embedded by the packer (opcode 250), if any.
    pub debugname: Option<String>,
}

impl ConfigType for LocType {
    const CATEGORY: &'static str = "loc";
    const ENTRY_NAME: &'static str = "loc.dat";

    fn with_id(id: u16) -> Self {
        Self {
            id,
            models: Vec::new(),
            name: None,
            desc: None,
            width: 1,
            length: 1,
            blockwalk: true,
            blockrange: true,
            active: None,
            hillskew: false,
            sharelight: false,
            occlude: false,
            wallwidth: 16,
            ops: Default::default(),
            offset: 0,
            debugname: None,
        }
    }

    fn id(&self) -> u16 {
        self.id
    }

    fn decode(&mut self, opcode: u8, buf: &mut ByteReader<'_>) -> Result<()> {
        match opcode {
            1 => {
                let count = buf.read_u8()?;
                let mut models = Vec::with_capacity(usize::from(count));
                for _ in 0..count {
                    let model = buf.read_u16()?;
                    let shape = buf.read_u8()?;
                    models.push((model, shape));
                }
                self.models = models;
            }
            2 => self.name = Some(buf.read_cstr()?),
            3 => self.desc = Some(buf.read_cstr()?),
            14 => self.width = buf.read_u8()?,
            15 => self.length = buf.read_u8()?,
            17 => self.blockwalk = false,
            18 => self.blockrange = false,
            19 => self.active = Some(buf.read_u8()? == 1),
            21 => self.hillskew = true,
            22 => self.sharelight = true,
            23 => self.occlude = true,
            28 => self.wallwidth = buf.read_u8()?,
            30..=34 => self.ops[usize::from(opcode) - 30] = Some(buf.read_cstr()?),
            39 => self.offset = buf.read_i8()?,
            250 => self.debugname = Some(buf.read_cstr()?),
            _ => return Err(self.unrecognized(opcode, buf)),
        }
        Ok(())
    }

    fn encode(&self, out: &mut ByteWriter) {
        if !self.models.is_empty() {
            out.write_u8(1);
            out.write_u8(self.models.len() as u8);
            for &(model, shape) in &self.models {
                out.write_u16(model);
                out.write_u8(shape);
            }
        }
        if let Some(name) = &self.name {
            out.write_u8(2);
            out.write_cstr(name);
        }
        if let Some(desc) = &self.desc {
            out.write_u8(3);
            out.write_cstr(desc);
        }
        if self.width != 1 {
            out.write_u8(14);
            out.write_u8(self.width);
        }
        if self.length != 1 {
            out.write_u8(15);
            out.write_u8(self.length);
        }
        if !self.blockwalk {
            out.write_u8(17);
        }
        if !self.blockrange {
            out.write_u8(18);
        }
        if let Some(active) = self.active {
            out.write_u8(19);
            out.write_u8(u8::from(active));
        }
        if self.hillskew {
            out.write_u8(21);
        }
        if self.sharelight {
            out.write_u8(22);
        }
        if self.occlude {
            out.write_u8(23);
        }
        if self.wallwidth != 16 {
            out.write_u8(28);
            out.write_u8(self.wallwidth);
        }
        for (i, op) in self.ops.iter().enumerate() {
            if let Some(op) = op {
                out.write_u8(30 + i as u8);
                out.write_cstr(op);
            }
        }
        if self.offset != 0 {
            out.write_u8(39);
            out.write_i8(self.offset);
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

    #[test]
    fn roundtrip() {
        let mut tree = LocType::with_id(0);
        tree.models = vec![(1276, 10)];
        tree.name = Some("Tree".to_string());
        tree.desc = Some("A leafy tree.".to_string());
        tree.hillskew = true;
        tree.ops[0] = Some("Chop down".to_string());
        tree.debugname = Some("tree".to_string());

        let mut door = LocType::with_id(1);
        door.models = vec![(2341, 0), (2342, 9)];
        door.name = Some("Door".to_string());
        door.width = 1;
        door.blockrange = false;
        door.active = Some(true);
        door.wallwidth = 32;
        door.offset = -8;
        door.ops[0] = Some("Open".to_string());

        let locs = vec![tree, door];
        let packed = Registry::pack(&locs).unwrap();
        let registry = Registry::<LocType>::load(&packed).unwrap();
        assert_eq!(registry.records(), &locs[..]);
    }

    #[test]
    fn flag_opcodes_carry_no_payload() {
        // opcodes 17, 21, 22, 23 back to back, then the terminator
        let data = [0x00, 0x01, 17, 21, 22, 23, 0];
        let registry = Registry::<LocType>::load(&data).unwrap();
        let loc = registry.get(0).unwrap();
        assert!(!loc.blockwalk);
        assert!(loc.hillskew);
        assert!(loc.sharelight);
        assert!(loc.occlude);
        assert!(loc.blockrange);
    }

    #[test]
    fn unrecognized_opcode_is_fatal() {
        let data = [0x00, 0x01, 77, 0];
        let err = Registry::<LocType>::load(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedOpcode {
                category: "loc",
                opcode: 77,
                ..
            }
        ));
    }
}
