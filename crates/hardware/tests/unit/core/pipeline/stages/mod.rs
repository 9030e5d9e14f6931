
/// EX and MEM stages: pass-through and branch resolution.
pub mod execute;


/// WB stage: retirement and halt detection.
pub mod writeback;
