use ratatui::style::Color;

/// Gruvbox Material (dark) palette
pub struct GruvboxMaterial;

impl GruvboxMaterial {
    pub const BG0: Color = Color::Rgb(0x28, 0x28, 0x28);
    pub const BG1: Color = Color::Rgb(0x32, 0x30, 0x2f);
    pub const BG2: Color = Color::Rgb(0x45, 0x40, 0x3d);
    pub const BG3: Color = Color::Rgb(0x50, 0x49, 0x45);

    pub const FG0: Color = Color::Rgb(0xd4, 0xbe, 0x98);
    pub const GREY0: Color = Color::Rgb(0x7c, 0x6f, 0x64);
    pub const GREY2: Color = Color::Rgb(0xa8, 0x99, 0x84);

    pub const YELLOW: Color = Color::Rgb(0xd8, 0xa6, 0x57);
    pub const GREEN: Color = Color::Rgb(0xa9, 0xb6, 0x65);
    pub const AQUA: Color = Color::Rgb(0x89, 0xb4, 0x82);
    pub const BLUE: Color = Color::Rgb(0x7d, 0xae, 0xa3);
    pub const PURPLE: Color = Color::Rgb(0xd3, 0x86, 0x9b);

    /// Background for section `index`, alternating so boundaries show
    pub fn section_bg(index: usize) -> Color {
        if index % 2 == 0 {
            Self::BG0
        } else {
            Self::BG1
        }
    }

    /// Accent colour cycling through the palette per section
    pub fn section_accent(index: usize) -> Color {
        const CYCLE: [Color; 5] = [
            GruvboxMaterial::AQUA,
            GruvboxMaterial::BLUE,
            GruvboxMaterial::PURPLE,
            GruvboxMaterial::YELLOW,
            GruvboxMaterial::GREEN,
        ];
        CYCLE[index % CYCLE.len()]
    }
}
