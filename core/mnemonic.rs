use crate::macros::define_catalog;

define_catalog! {
    /// Instruction mnemonics of the MC68000.
    pub enum Mnemonic {
        Abcd        = 0x01 => "abcd",
        Add         = 0x02 => "add",
        Adda        = 0x03 => "adda",
        Addi        = 0x04 => "addi",
        Addq        = 0x05 => "addq",
        Addx        = 0x06 => "addx",
        And         = 0x07 => "and",
        Andi        = 0x08 => "andi",
        AndiCcr     = 0x09 => "andi",
        AndiSr      = 0x0a => "andi",
        Asl         = 0x0b => "asl",
        Asr         = 0x0c => "asr",
        Bcc         = 0x0d => "bcc",
        Bchg        = 0x0e => "bchg",
        Bclr        = 0x0f => "bclr",
        Bcs         = 0x10 => "bcs",
        Beq         = 0x11 => "beq",
        Bge         = 0x12 => "bge",
        Bgt         = 0x13 => "bgt",
        Bhi         = 0x14 => "bhi",
        Ble         = 0x15 => "ble",
        Bls         = 0x16 => "bls",
        Blt         = 0x17 => "blt",
        Bmi         = 0x18 => "bmi",
        Bne         = 0x19 => "bne",
        Bpl         = 0x1a => "bpl",
        Bra         = 0x1b => "bra",
        Bset        = 0x1c => "bset",
        Bsr         = 0x1d => "bsr",
        Btst        = 0x1e => "btst",
        Bvc         = 0x1f => "bvc",
        Bvs         = 0x20 => "bvs",
        Chk         = 0x21 => "chk",
        Clr         = 0x22 => "clr",
        Cmp         = 0x23 => "cmp",
        Cmpa        = 0x24 => "cmpa",
        Cmpi        = 0x25 => "cmpi",
        Cmpm        = 0x26 => "cmpm",
        Dbcc        = 0x27 => "dbcc",
        Dbcs        = 0x28 => "dbcs",
        Dbeq        = 0x29 => "dbeq",
        Dbf         = 0x2a => "dbf",
        Dbge        = 0x2b => "dbge",
        Dbgt        = 0x2c => "dbgt",
        Dbhi        = 0x2d => "dbhi",
        Dble        = 0x2e => "dble",
        Dbls        = 0x2f => "dbls",
        Dblt        = 0x30 => "dblt",
        Dbmi        = 0x31 => "dbmi",
        Dbne        = 0x32 => "dbne",
        Dbpl        = 0x33 => "dbpl",
        Dbt         = 0x34 => "dbt",
        Dbvc        = 0x35 => "dbvc",
        Dbvs        = 0x36 => "dbvs",
        Divs        = 0x37 => "divs",
        Divu        = 0x38 => "divu",
        Eor         = 0x39 => "eor",
        Eori        = 0x3a => "eori",
        EoriCcr     = 0x3b => "eori",
        EoriSr      = 0x3c => "eori",
        Exg         = 0x3d => "exg",
        Ext         = 0x3e => "ext",
        Illegal     = 0x3f => "illegal",
        Jmp         = 0x40 => "jmp",
        Jsr         = 0x41 => "jsr",
        Lea         = 0x42 => "lea",
        Link        = 0x43 => "link",
        Lsl         = 0x44 => "lsl",
        Lsr         = 0x45 => "lsr",
        Move        = 0x46 => "move",
        Movea       = 0x47 => "movea",
        MoveCcr     = 0x48 => "move",
        MoveFromSr  = 0x49 => "move",
        Movem       = 0x4a => "movem",
        Movep       = 0x4b => "movep",
        Moveq       = 0x4c => "moveq",
        MoveSr      = 0x4d => "move",
        MoveUsp     = 0x4e => "move",
        Muls        = 0x4f => "muls",
        Mulu        = 0x50 => "mulu",
        Nbcd        = 0x51 => "nbcd",
        Neg         = 0x52 => "neg",
        Negx        = 0x53 => "negx",
        Nop         = 0x54 => "nop",
        Not         = 0x55 => "not",
        Or          = 0x56 => "or",
        Ori         = 0x57 => "ori",
        OriCcr      = 0x58 => "ori",
        OriSr       = 0x59 => "ori",
        Pea         = 0x5a => "pea",
        Reset       = 0x5b => "reset",
        Rol         = 0x5c => "rol",
        Ror         = 0x5d => "ror",
        Roxl        = 0x5e => "roxl",
        Roxr        = 0x5f => "roxr",
        Rte         = 0x60 => "rte",
        Rtr         = 0x61 => "rtr",
        Rts         = 0x62 => "rts",
        Sbcd        = 0x63 => "sbcd",
        Scc         = 0x64 => "scc",
        Scs         = 0x65 => "scs",
        Seq         = 0x66 => "seq",
        Sf          = 0x67 => "sf",
        Sge         = 0x68 => "sge",
        Sgt         = 0x69 => "sgt",
        Shi         = 0x6a => "shi",
        Sle         = 0x6b => "sle",
        Sls         = 0x6c => "sls",
        Slt         = 0x6d => "slt",
        Smi         = 0x6e => "smi",
        Sne         = 0x6f => "sne",
        Spl         = 0x70 => "spl",
        St          = 0x71 => "st",
        Stop        = 0x72 => "stop",
        Sub         = 0x73 => "sub",
        Suba        = 0x74 => "suba",
        Subi        = 0x75 => "subi",
        Subq        = 0x76 => "subq",
        Subx        = 0x77 => "subx",
        Svc         = 0x78 => "svc",
        Svs         = 0x79 => "svs",
        Swap        = 0x7a => "swap",
        Tas         = 0x7b => "tas",
        Trap        = 0x7c => "trap",
        Trapv       = 0x7d => "trapv",
        Tst         = 0x7e => "tst",
        Unlk        = 0x7f => "unlk",
    }
}

/// Condition codes in encoding order.
#[rustfmt::skip]
const BRANCH: [Mnemonic; 16] = [
    Mnemonic::Bra, Mnemonic::Bsr, Mnemonic::Bhi, Mnemonic::Bls,
    Mnemonic::Bcc, Mnemonic::Bcs, Mnemonic::Bne, Mnemonic::Beq,
    Mnemonic::Bvc, Mnemonic::Bvs, Mnemonic::Bpl, Mnemonic::Bmi,
    Mnemonic::Bge, Mnemonic::Blt, Mnemonic::Bgt, Mnemonic::Ble,
];

#[rustfmt::skip]
const DECREMENT_BRANCH: [Mnemonic; 16] = [
    Mnemonic::Dbt,  Mnemonic::Dbf,  Mnemonic::Dbhi, Mnemonic::Dbls,
    Mnemonic::Dbcc, Mnemonic::Dbcs, Mnemonic::Dbne, Mnemonic::Dbeq,
    Mnemonic::Dbvc, Mnemonic::Dbvs, Mnemonic::Dbpl, Mnemonic::Dbmi,
    Mnemonic::Dbge, Mnemonic::Dblt, Mnemonic::Dbgt, Mnemonic::Dble,
];

#[rustfmt::skip]
const SET: [Mnemonic; 16] = [
    Mnemonic::St,  Mnemonic::Sf,  Mnemonic::Shi, Mnemonic::Sls,
    Mnemonic::Scc, Mnemonic::Scs, Mnemonic::Sne, Mnemonic::Seq,
    Mnemonic::Svc, Mnemonic::Svs, Mnemonic::Spl, Mnemonic::Smi,
    Mnemonic::Sge, Mnemonic::Slt, Mnemonic::Sgt, Mnemonic::Sle,
];

impl Mnemonic {
    /// `Bcc` family member for a 4-bit condition, `bra` and `bsr` included.
    pub fn branch(cond: u32) -> Self {
        BRANCH[cond as usize & 15]
    }

    /// `DBcc` family member for a 4-bit condition.
    pub fn decrement_branch(cond: u32) -> Self {
        DECREMENT_BRANCH[cond as usize & 15]
    }

    /// `Scc` family member for a 4-bit condition.
    pub fn set(cond: u32) -> Self {
        SET[cond as usize & 15]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable() {
        assert_eq!(Mnemonic::Abcd.id(), 0x01);
        assert_eq!(Mnemonic::Bra.id(), 0x1b);
        assert_eq!(Mnemonic::Dbf.id(), 0x2a);
        assert_eq!(Mnemonic::Move.id(), 0x46);
        assert_eq!(Mnemonic::Sbcd.id(), 0x63);
        assert_eq!(Mnemonic::Unlk.id(), 0x7f);
    }

    #[test]
    fn every_id_round_trips() {
        let mut count = 0;
        for id in 0..=0xffff {
            if let Some(m) = Mnemonic::from_id(id) {
                assert_eq!(m.id(), id);
                count += 1;
            }
        }
        assert_eq!(count, 127);
    }

    #[test]
    fn conditions() {
        assert_eq!(Mnemonic::branch(0b0110), Mnemonic::Bne);
        assert_eq!(Mnemonic::decrement_branch(1).text(), "dbf");
        assert_eq!(Mnemonic::set(0b1111), Mnemonic::Sle);
    }
}
