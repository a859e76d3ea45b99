use disasm68k_core::{bits::BitReader, error::Error, insn::Insn};

use crate::{arith, bits, flow, logic, moves};

/// Decoder of a single instruction form.
pub struct Rule {
    pub name: &'static str,
    pub decode: fn(&mut BitReader) -> Result<Insn, Error>,
}

macro_rules! rules {
    ($($name:literal => $decode:path),+ $(,)?) => {
        &[$(Rule { name: $name, decode: $decode }),+]
    };
}

/// Instruction forms in matching order.
///
/// Forms whose bit patterns overlap are ordered most specific first. The
/// immediate forms to CCR and SR precede the immediate arithmetic, MOVEP
/// precedes the dynamic bit operations, ADDX/SUBX/CMPM/ABCD/SBCD/EXG precede
/// the generic forms of their line.
pub static CATALOG: &[Rule] = rules! {
    "ori_ccr"       => logic::ori_ccr,
    "ori_sr"        => logic::ori_sr,
    "andi_ccr"      => logic::andi_ccr,
    "andi_sr"       => logic::andi_sr,
    "eori_ccr"      => logic::eori_ccr,
    "eori_sr"       => logic::eori_sr,
    "ori"           => logic::ori,
    "andi"          => logic::andi,
    "subi"          => arith::subi,
    "addi"          => arith::addi,
    "eori"          => logic::eori,
    "cmpi"          => arith::cmpi,
    "movep"         => moves::movep,
    "bit_static"    => bits::bit_static,
    "bit_dynamic"   => bits::bit_dynamic,

    "movea"         => moves::movea,
    "move"          => moves::move_,

    "move_from_sr"  => moves::move_from_sr,
    "move_to_ccr"   => moves::move_to_ccr,
    "move_to_sr"    => moves::move_to_sr,
    "negx"          => arith::negx,
    "clr"           => arith::clr,
    "neg"           => arith::neg,
    "not"           => logic::not,
    "ext"           => arith::ext,
    "swap"          => moves::swap,
    "pea"           => moves::pea,
    "nbcd"          => arith::nbcd,
    "movem"         => moves::movem,
    "illegal"       => flow::illegal,
    "tas"           => logic::tas,
    "tst"           => arith::tst,
    "trap"          => flow::trap,
    "link"          => flow::link,
    "unlk"          => flow::unlk,
    "move_usp"      => moves::move_usp,
    "reset"         => flow::reset,
    "nop"           => flow::nop,
    "stop"          => flow::stop,
    "rte"           => flow::rte,
    "rts"           => flow::rts,
    "trapv"         => flow::trapv,
    "rtr"           => flow::rtr,
    "jsr"           => flow::jsr,
    "jmp"           => flow::jmp,
    "lea"           => moves::lea,
    "chk"           => arith::chk,

    "dbcc"          => flow::dbcc,
    "scc"           => flow::scc,
    "addq"          => arith::addq,
    "subq"          => arith::subq,

    "bcc"           => flow::bcc,

    "moveq"         => moves::moveq,

    "sbcd"          => arith::sbcd,
    "divu"          => arith::divu,
    "divs"          => arith::divs,
    "or"            => logic::or,

    "subx"          => arith::subx,
    "suba"          => arith::suba,
    "sub"           => arith::sub,

    "cmpm"          => arith::cmpm,
    "cmpa"          => arith::cmpa,
    "cmp"           => arith::cmp,
    "eor"           => logic::eor,

    "abcd"          => arith::abcd,
    "exg"           => moves::exg,
    "mulu"          => arith::mulu,
    "muls"          => arith::muls,
    "and"           => logic::and,

    "addx"          => arith::addx,
    "adda"          => arith::adda,
    "add"           => arith::add,

    "shift_memory"  => bits::shift_memory,
    "shift"         => bits::shift_register,
};
