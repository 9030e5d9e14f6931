use pipesim_core::trace::{OpType, TraceRecord};

/// Fluent builder for [`TraceRecord`].
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder(TraceRecord);

impl RecordBuilder {
    pub fn new(op_type: OpType) -> Self {
        Self(TraceRecord {
            op_type,
            ..Default::default()
        })
    }

    /// Writes register `reg`.
    pub fn dest(mut self, reg: u8) -> Self {
        self.0.dest = reg;
        self.0.dest_needed = true;
        self
    }

    /// Reads register `reg` as source 1.
    pub fn src1(mut self, reg: u8) -> Self {
        self.0.src1_reg = reg;
        self.0.src1_needed = true;
        self
    }

    /// Reads register `reg` as source 2.
    pub fn src2(mut self, reg: u8) -> Self {
        self.0.src2_reg = reg;
        self.0.src2_needed = true;
        self
    }

    pub fn cc_write(mut self) -> Self {
        self.0.cc_write = true;
        self
    }

    pub fn cc_read(mut self) -> Self {
        self.0.cc_read = true;
        self
    }

    pub fn taken(mut self, taken: bool) -> Self {
        self.0.br_taken = taken;
        self
    }

    pub fn at(mut self, addr: u64) -> Self {
        self.0.inst_addr = addr;
        self
    }

    pub fn build(self) -> TraceRecord {
        self.0
    }
}

/// ALU op writing `dest` and reading the given sources.
pub fn alu(dest: u8, srcs: &[u8]) -> TraceRecord {
    with_srcs(RecordBuilder::new(OpType::Alu).dest(dest), srcs)
}

/// Load into `dest` with the given address sources.
pub fn load(dest: u8, srcs: &[u8]) -> TraceRecord {
    with_srcs(RecordBuilder::new(OpType::Load).dest(dest), srcs)
}

/// Conditional branch at `addr` reading the condition code.
pub fn cbr(addr: u64, taken: bool) -> TraceRecord {
    RecordBuilder::new(OpType::Cbr)
        .cc_read()
        .taken(taken)
        .at(addr)
        .build()
}

fn with_srcs(b: RecordBuilder, srcs: &[u8]) -> TraceRecord {
    match *srcs {
        [] => b.build(),
        [s1] => b.src1(s1).build(),
        [s1, s2] => b.src1(s1).src2(s2).build(),
        _ => panic!("at most two sources, got {srcs:?}"),
    }
}
