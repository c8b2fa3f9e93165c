/*
    Every file the tools read or write lives at a fixed path relative to the served directory,
    so both the server and `generate_certs` agree on where the certificate pair is.
*/

macro_rules! define_key_cert {
    (
        const KEY_FILE: $key_ty: ty = $key_path: literal;
        const CERT_FILE: $cert_ty: ty = $cert_path: literal;
        const ICONS_DIR: $icons_ty: ty = $icons_path: literal;
    ) => {
        pub const KEY_FILE:  $key_ty = $key_path;
        pub const CERT_FILE: $cert_ty = $cert_path;
        pub const ICONS_DIR: $icons_ty = $icons_path;
    };
}

define_key_cert! {
    const KEY_FILE:  &str = "server.key";
    const CERT_FILE: &str = "server.crt";
    const ICONS_DIR: &str = "icons";
}

pub const DEFAULT_PORT: u16 = 8443;

/// Sizes required by the web app manifest, favicons included.
pub const DEFAULT_ICON_SIZES: [u32; 10] = [16, 32, 72, 96, 128, 144, 152, 192, 384, 512];

#[inline]
pub fn icon_file_name(size: u32, extension: &str) -> String {
    format!("icon-{size}x{size}.{extension}")
}
