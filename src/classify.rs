//! Arithmetic instruction classification
//!
//! Maps an instruction mnemonic (as delivered by the instrumentation host)
//! to an arithmetic class. Classification is a pure, total function: every
//! mnemonic maps to exactly one class, with `Unclassified` as the catch-all.
//! The match arms are partitioned by instruction family so new instruction
//! set generations can be added without touching existing cases.

/// Arithmetic instruction class.
///
/// Covers scalar integer arithmetic, packed (SIMD) integer arithmetic,
/// SSE and AVX floating point, and legacy x87 FPU instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithClass {
    // Scalar integer
    Add,
    Sub,
    Mul,
    Div,
    Inc,
    Dec,
    Neg,
    Imul,
    Idiv,
    // Packed integer (SSE2/AVX2)
    SimdAdd,
    SimdSub,
    SimdMul,
    // SSE floating point
    SseAdd,
    SseSub,
    SseMul,
    SseDiv,
    // AVX floating point
    AvxAdd,
    AvxSub,
    AvxMul,
    AvxDiv,
    // x87 FPU
    FpuAdd,
    FpuSub,
    FpuMul,
    FpuDiv,
    /// Anything not recognized as arithmetic
    Unclassified,
}

impl ArithClass {
    /// All classes in report order.
    pub const ALL: [ArithClass; 25] = [
        ArithClass::Add,
        ArithClass::Sub,
        ArithClass::Mul,
        ArithClass::Div,
        ArithClass::Inc,
        ArithClass::Dec,
        ArithClass::Neg,
        ArithClass::Imul,
        ArithClass::Idiv,
        ArithClass::SimdAdd,
        ArithClass::SimdSub,
        ArithClass::SimdMul,
        ArithClass::SseAdd,
        ArithClass::SseSub,
        ArithClass::SseMul,
        ArithClass::SseDiv,
        ArithClass::AvxAdd,
        ArithClass::AvxSub,
        ArithClass::AvxMul,
        ArithClass::AvxDiv,
        ArithClass::FpuAdd,
        ArithClass::FpuSub,
        ArithClass::FpuMul,
        ArithClass::FpuDiv,
        ArithClass::Unclassified,
    ];

    /// Stable uppercase label used in report tables.
    pub fn label(self) -> &'static str {
        match self {
            ArithClass::Add => "ADD",
            ArithClass::Sub => "SUB",
            ArithClass::Mul => "MUL",
            ArithClass::Div => "DIV",
            ArithClass::Inc => "INC",
            ArithClass::Dec => "DEC",
            ArithClass::Neg => "NEG",
            ArithClass::Imul => "IMUL",
            ArithClass::Idiv => "IDIV",
            ArithClass::SimdAdd => "SIMD_ADD",
            ArithClass::SimdSub => "SIMD_SUB",
            ArithClass::SimdMul => "SIMD_MUL",
            ArithClass::SseAdd => "SSE_ADD",
            ArithClass::SseSub => "SSE_SUB",
            ArithClass::SseMul => "SSE_MUL",
            ArithClass::SseDiv => "SSE_DIV",
            ArithClass::AvxAdd => "AVX_ADD",
            ArithClass::AvxSub => "AVX_SUB",
            ArithClass::AvxMul => "AVX_MUL",
            ArithClass::AvxDiv => "AVX_DIV",
            ArithClass::FpuAdd => "FPU_ADD",
            ArithClass::FpuSub => "FPU_SUB",
            ArithClass::FpuMul => "FPU_MUL",
            ArithClass::FpuDiv => "FPU_DIV",
            ArithClass::Unclassified => "UNKNOWN",
        }
    }
}

/// Classify an instruction mnemonic into its arithmetic class.
///
/// Total over all inputs: anything not recognized returns
/// [`ArithClass::Unclassified`]. Mnemonics are expected lowercase, the
/// form instrumentation hosts report them in.
pub fn classify(mnemonic: &str) -> ArithClass {
    match mnemonic {
        // Scalar integer
        "add" => ArithClass::Add,
        "sub" => ArithClass::Sub,
        "mul" => ArithClass::Mul,
        "div" => ArithClass::Div,
        "inc" => ArithClass::Inc,
        "dec" => ArithClass::Dec,
        "neg" => ArithClass::Neg,
        "imul" => ArithClass::Imul,
        "idiv" => ArithClass::Idiv,

        // Packed integer (SSE2/AVX2)
        "paddb" | "paddw" | "paddd" | "paddq" | "vpaddb" | "vpaddw" | "vpaddd" | "vpaddq" => {
            ArithClass::SimdAdd
        }
        "psubb" | "psubw" | "psubd" | "psubq" | "vpsubb" | "vpsubw" | "vpsubd" | "vpsubq" => {
            ArithClass::SimdSub
        }
        "pmullw" | "pmulld" | "vpmullw" | "vpmulld" | "pmuludq" | "vpmuludq" => ArithClass::SimdMul,

        // SSE floating point
        "addss" | "addsd" | "addps" | "addpd" => ArithClass::SseAdd,
        "subss" | "subsd" | "subps" | "subpd" => ArithClass::SseSub,
        "mulss" | "mulsd" | "mulps" | "mulpd" => ArithClass::SseMul,
        "divss" | "divsd" | "divps" | "divpd" => ArithClass::SseDiv,

        // AVX floating point
        "vaddss" | "vaddsd" | "vaddps" | "vaddpd" => ArithClass::AvxAdd,
        "vsubss" | "vsubsd" | "vsubps" | "vsubpd" => ArithClass::AvxSub,
        "vmulss" | "vmulsd" | "vmulps" | "vmulpd" => ArithClass::AvxMul,
        "vdivss" | "vdivsd" | "vdivps" | "vdivpd" => ArithClass::AvxDiv,

        // x87 FPU (including reversed-operand forms)
        "fadd" | "faddp" | "fiadd" => ArithClass::FpuAdd,
        "fsub" | "fsubp" | "fisub" | "fsubr" | "fsubrp" => ArithClass::FpuSub,
        "fmul" | "fmulp" | "fimul" => ArithClass::FpuMul,
        "fdiv" | "fdivp" | "fidiv" | "fdivr" | "fdivrp" => ArithClass::FpuDiv,

        _ => ArithClass::Unclassified,
    }
}

/// Whether a mnemonic counts as arithmetic at all.
pub fn is_arithmetic(mnemonic: &str) -> bool {
    classify(mnemonic) != ArithClass::Unclassified
}
