//! License exception records and the built-in SPDX table.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
/// One SPDX license exception.
pub struct LicenseException {
    /// The SPDX id of the license exception.
    pub id: &'static str,
    /// The human-readable name of the license exception.
    pub full_name: &'static str,
    /// Whether the id is only kept for historical compatibility.
    pub deprecated: bool,
}

impl LicenseException {
    pub const fn new(id: &'static str, full_name: &'static str) -> Self {
        Self {
            id,
            full_name,
            deprecated: false,
        }
    }

    pub const fn deprecated(id: &'static str, full_name: &'static str) -> Self {
        Self {
            id,
            full_name,
            deprecated: true,
        }
    }

    /// Resolve `identifier` against the built-in catalog.
    pub fn for_id(identifier: &str) -> Option<&'static LicenseException> {
        crate::resolve(identifier)
    }

    /// Licenses this exception may be appended to, from the bundled mapping.
    pub fn compatible_licenses(&self) -> Result<Vec<String>, crate::LoadError> {
        crate::compatible_licenses(self)
    }

    /// The full legal text of this exception, from the bundled resources.
    pub fn text(&self) -> Result<std::sync::Arc<str>, crate::LoadError> {
        crate::exception_text(self)
    }
}

impl fmt::Display for LicenseException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

/// SPDX license exceptions in upstream list order.
pub const SPDX_EXCEPTIONS: &[LicenseException] = &[
    LicenseException::new("Autoconf-exception-2.0", "Autoconf exception 2.0"),
    LicenseException::new("Autoconf-exception-3.0", "Autoconf exception 3.0"),
    LicenseException::new("Bison-exception-2.2", "Bison exception 2.2"),
    LicenseException::new("Bootloader-exception", "Bootloader Distribution Exception"),
    LicenseException::new("Classpath-exception-2.0", "Classpath exception 2.0"),
    LicenseException::new("CLISP-exception-2.0", "CLISP exception 2.0"),
    LicenseException::new("DigiRule-FOSS-exception", "DigiRule FOSS License Exception"),
    LicenseException::new("eCos-exception-2.0", "eCos exception 2.0"),
    LicenseException::new("Fawkes-Runtime-exception", "Fawkes Runtime Exception"),
    LicenseException::new("FLTK-exception", "FLTK exception"),
    LicenseException::new("Font-exception-2.0", "Font exception 2.0"),
    LicenseException::new("freertos-exception-2.0", "FreeRTOS Exception 2.0"),
    LicenseException::new("GCC-exception-2.0", "GCC Runtime Library exception 2.0"),
    LicenseException::new("GCC-exception-3.1", "GCC Runtime Library exception 3.1"),
    LicenseException::new("gnu-javamail-exception", "GNU JavaMail exception"),
    LicenseException::new("GPL-3.0-linking-exception", "GPL-3.0 Linking Exception"),
    LicenseException::new(
        "GPL-3.0-linking-source-exception",
        "GPL-3.0 Linking Exception (with Corresponding Source)",
    ),
    LicenseException::new("GPL-CC-1.0", "GPL Cooperation Commitment 1.0"),
    LicenseException::new("i2p-gpl-java-exception", "i2p GPL+Java Exception"),
    LicenseException::new("LGPL-3.0-linking-exception", "LGPL-3.0 Linking Exception"),
    LicenseException::new("Libtool-exception", "Libtool Exception"),
    LicenseException::new("Linux-syscall-note", "Linux Syscall Note"),
    LicenseException::new("LLVM-exception", "LLVM Exception"),
    LicenseException::new("LZMA-exception", "LZMA exception"),
    LicenseException::new("mif-exception", "Macros and Inline Functions Exception"),
    LicenseException::deprecated("Nokia-Qt-exception-1.1", "Nokia Qt LGPL exception 1.1"),
    LicenseException::new("OCaml-LGPL-linking-exception", "OCaml LGPL Linking Exception"),
    LicenseException::new("OCCT-exception-1.0", "Open CASCADE Exception 1.0"),
    LicenseException::new("OpenJDK-assembly-exception-1.0", "OpenJDK Assembly exception 1.0"),
    LicenseException::new("openvpn-openssl-exception", "OpenVPN OpenSSL Exception"),
    LicenseException::new(
        "PS-or-PDF-font-exception-20170817",
        "PS/PDF font exception (2017-08-17)",
    ),
    LicenseException::new("Qt-GPL-exception-1.0", "Qt GPL exception 1.0"),
    LicenseException::new("Qt-LGPL-exception-1.1", "Qt LGPL exception 1.1"),
    LicenseException::new("Qwt-exception-1.0", "Qwt exception 1.0"),
    LicenseException::new("SHL-2.0", "Solderpad Hardware License v2.0"),
    LicenseException::new("SHL-2.1", "Solderpad Hardware License v2.1"),
    LicenseException::new("Swift-exception", "Swift Exception"),
    LicenseException::new("Universal-FOSS-exception-1.0", "Universal FOSS Exception, Version 1.0"),
    LicenseException::new("u-boot-exception-2.0", "U-Boot exception 2.0"),
    LicenseException::new("WxWindows-exception-3.1", "WxWindows Library Exception 3.1"),
    LicenseException::new("389-exception", "389 Directory Server Exception"),
];
