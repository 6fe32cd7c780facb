//! NPC definitions

use super::ConfigType;
use crate::buffer::{ByteReader, ByteWriter};
use crate::error::Result;

/// One NPC definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcType {
    id: u16,
    /// Model ids (opcode 1: count byte, then one u16 per model).
    pub models: Vec<u16>,
    /// NPC name (opcode 2).
    pub name: Option<String>,
    /// Examine text (opcode 3).
    pub desc: Option<String>,
    /// Footprint in tiles (opcode 12).
    pub size: u8,
    /// Idle animation (opcode 13).
    pub readyanim: Option<u16>,
    /// Walk animation (opcode 14).
    pub walkanim: Option<u16>,
    /// Walk, turn-back, turn-left, turn-right animations (opcode 17).
    pub walkanims: Option<[u16; 4]>,
    /// Right-click options (opcodes 30-34).
    pub ops: [Option<String>; 5],
    /// Unnamed 16-bit field (opcode 90), kept verbatim for re-packing.
    pub code90: u16,
    /// Combat level shown under the name (opcode 95); 0 hides it.
    pub vislevel: u16,
    /// Horizontal and vertical model scaling, 128 = unscaled (opcodes 97, 98).
    pub resizeh: u16,
    pub resizev: u16,
    /// Symbolic name embedded by the packer (opcode 250), if any.
    pub debugname: Option<String>,
}

impl ConfigType for NpcType {
    const CATEGORY: &'static str = "npc";
    const ENTRY_NAME: &'static str = "npc.dat";

    fn with_id(id: u16) -> Self {
        Self {
            id,
            models: Vec::new(),
            name: None,
            desc: None,
            size: 1,
            readyanim: None,
            walkanim: None,
            walkanims: None,
            ops: Default::default(),
            code90: 0,
            vislevel: 0,
            resizeh: 128,
            resizev: 128,
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
                    models.push(buf.read_u16()?);
                }
                self.models = models;
            }
            2 => self.name = Some(buf.read_cstr()?),
            3 => self.desc = Some(buf.read_cstr()?),
            12 => self.size = buf.read_u8()?,
            13 => self.readyanim = Some(buf.read_u16()?),
            14 => self.walkanim = Some(buf.read_u16()?),
            17 => {
                self.walkanims = Some([
                    buf.read_u16()?,
                    buf.read_u16()?,
                    buf.read_u16()?,
                    buf.read_u16()?,
                ]);
            }
            30..=34 => self.ops[usize::from(opcode) - 30] = Some(buf.read_cstr()?),
            90 => self.code90 = buf.read_u16()?,
            95 => self.vislevel = buf.read_u16()?,
            97 => self.resizeh = buf.read_u16()?,
            98 => self.resizev = buf.read_u16()?,
            250 => self.debugname = Some(buf.read_cstr()?),
            _ => return Err(self.unrecognized(opcode, buf)),
        }
        Ok(())
    }

    fn encode(&self, out: &mut ByteWriter) {
        if !self.models.is_empty() {
            out.write_u8(1);
            out.write_u8(self.models.len() as u8);
            for &model in &self.models {
                out.write_u16(model);
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
        if self.size != 1 {
            out.write_u8(12);
            out.write_u8(self.size);
        }
        if let Some(readyanim) = self.readyanim {
            out.write_u8(13);
            out.write_u16(readyanim);
        }
        if let Some(walkanim) = self.walkanim {
            out.write_u8(14);
            out.write_u16(walkanim);
        }
        if let Some(walkanims) = self.walkanims {
            out.write_u8(17);
            for anim in walkanims {
                out.write_u16(anim);
            }
        }
        for (i, op) in self.ops.iter().enumerate() {
            if let Some(op) = op {
                out.write_u8(30 + i as u8);
                out.write_cstr(op);
            }
        }
        if self.code90 != 0 {
            out.write_u8(90);
            out.write_u16(self.code90);
        }
        if self.vislevel != 0 {
            out.write_u8(95);
            out.write_u16(self.vislevel);
        }
        if self.resizeh != 128 {
            out.write_u8(97);
            out.write_u16(self.resizeh);
        }
        if self.resizev != 128 {
            out.write_u8(98);
            out.write_u16(self.resizev);
        }
        if let Some(debugname) = &self.debugname {
            out.write_u8(250);
            out.write_cstr(debugname);
        }
    }
}
