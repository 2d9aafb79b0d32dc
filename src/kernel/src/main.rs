//! kronox Kernel Entry Point
//!
//! This is the main entry point for the kronox kernel. It only does anything
//! when built for the bare-metal target; a hosted build prints how to boot it.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel {
    use bootloader::{entry_point, BootInfo};
    use core::fmt::Write;
    use core::panic::PanicInfo;
    use kronox_hal::InterruptController;
    use kronox_kernel::arch::x86_64::{self, gdt, interrupts, keyboard, pic, vga, Color};
    use kronox_kernel::boot::{self, banner, Status};
    use kronox_kernel::config::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
    use kronox_kernel::console::{self, Console};
    use kronox_kernel::input::KEYBOARD_BUFFER;
    use kronox_kernel::{logger, println, serial_println};

    entry_point!(kernel_main);

    /// Kernel entry point.
    ///
    /// Called by the bootloader after setting up the initial environment.
    fn kernel_main(_boot_info: &'static BootInfo) -> ! {
        // ====================================================================
        // Phase 1: Output
        // ====================================================================
        kronox_kernel::init();
        let logger_ready = logger::init();

        vga::set_color(DEFAULT_FOREGROUND, DEFAULT_BACKGROUND);
        vga::clear_screen();
        vga::disable_hardware_cursor();
        banner::print_banner();

        match logger_ready {
            Ok(()) => boot::log(Status::Ok, "Serial logger on COM1"),
            Err(err) => {
                serial_println!("logger: {}", err);
                boot::log(Status::Warn, "Serial logger unavailable");
            }
        }

        // ====================================================================
        // Phase 2: Interrupts
        // ====================================================================
        gdt::init();
        boot::log(Status::Ok, "GDT loaded");
        interrupts::init_idt();
        boot::log(Status::Ok, "IDT configured");
        pic::init();
        boot::log(Status::Ok, "PIC remapped");
        let stale = keyboard::init();
        boot::log(Status::Ok, "Keyboard on IRQ1");
        boot::log_detail(format_args!("{} stale byte(s) discarded", stale));
        pic::PicController.enable();

        // ====================================================================
        // Boot Complete
        // ====================================================================
        println!();
        banner::print_ready();

        Console::new(&KEYBOARD_BUFFER).run(vga::writer(), x86_64::hlt, x86_64::fatal)
    }

    /// Panic handler.
    ///
    /// Called when the kernel encounters an unrecoverable error.
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        ::x86_64::instructions::interrupts::disable();
        // Use the already-initialized serial port
        serial_println!("KERNEL PANIC: {}", info);

        // SAFETY: interrupts are off and this handler never returns.
        let mut writer = unsafe { console::seize(vga::writer()) };
        writer.set_color(Color::LightRed, Color::Black);
        let _ = write!(writer, "\n\n!!! KERNEL PANIC !!!\n");
        writer.set_color(Color::White, Color::Black);
        let _ = writeln!(writer, "{}", info);

        x86_64::halt_loop()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!(
        "kronox-kernel is a bare-metal image; run it with \
         `cargo bootimage --target x86_64-kronox.json` and QEMU"
    );
    std::process::exit(1);
}
