fn main() {
    // Compile Slint UI files
    slint_build::compile("ui/main.slint").unwrap();

    // Embed Windows resources (icon, version info)
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "LaunchDeck");
        res.set("FileDescription", "Game-session automation configuration editor");
        res.set("CompanyName", "LaunchDeck Contributors");
        res.set("LegalCopyright", "Copyright © 2026 LaunchDeck Contributors");
        res.set("OriginalFilename", "launchdeck.exe");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
