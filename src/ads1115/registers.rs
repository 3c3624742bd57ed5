// Register pointers
pub const REG_POINTER_CONVERT: u8 = 0x00;
pub const REG_POINTER_CONFIG: u8 = 0x01;

// Config register fields
pub const CONFIG_MODE_CONTIN: u16 = 0x0000;
pub const CONFIG_MODE_SINGLE: u16 = 0x0100;
pub const CONFIG_CQUE_NONE: u16 = 0x0003;
pub const CONFIG_CLAT_NONLAT: u16 = 0x0000;
pub const CONFIG_PGA_4_096V: u16 = 0x0200;
pub const CONFIG_CPOL_ACTVLOW: u16 = 0x0000;
pub const CONFIG_CMODE_TRAD: u16 = 0x0000;
pub const CONFIG_DR_860SPS: u16 = 0x00e0;
pub const CONFIG_MUX_SINGLE_0: u16 = 0x4000;
pub const CONFIG_MUX_STEP: u16 = 0x1000;
