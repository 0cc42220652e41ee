/// Free-running microsecond counter. Wraps around at `u32::MAX`.
pub trait Clock {
    fn now_us(&mut self) -> u32;

    /// Busy-waits for `us` microseconds. Only the blocking refresh mode
    /// uses this.
    fn delay_us(&mut self, us: u32) {
        let start = self.now_us();
        while self.now_us().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_us(&mut self) -> u32 {
        (**self).now_us()
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
