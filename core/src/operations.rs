use rand::Rng;

use crate::constants::SPRITE_HEIGHT;
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::registers::Registers;
use crate::state::{Execution, State};
use crate::timers::Timer;

/// Instruction semantics. The program counter has already been moved past the
/// instruction being executed, so skips add 2 and jumps overwrite it outright.
impl State {
    pub fn execute<R: Rng>(
        &mut self,
        instruction: Instruction,
        keypad: &Keypad,
        rng: &mut R,
    ) -> Result<(), Fault> {
        use Instruction::*;

        match instruction {
            Clear => self.clr(),
            Return => self.rts()?,
            Jump { addr } => self.registers.set_pc(addr),
            Call { addr } => self.call(addr)?,
            SkipEqual { x, nn } => self.skip_if(self.registers.v(x) == nn),
            SkipNotEqual { x, nn } => self.skip_if(self.registers.v(x) != nn),
            SkipRegistersEqual { x, y } => {
                self.skip_if(self.registers.v(x) == self.registers.v(y))
            }
            Load { x, nn } => self.registers.set_v(x, nn),
            Add { x, nn } => self.add(x, nn),
            Move { x, y } => self.registers.set_v(x, self.registers.v(y)),
            Or { x, y } => self.alu(x, y, |vx, vy| vx | vy),
            And { x, y } => self.alu(x, y, |vx, vy| vx & vy),
            Xor { x, y } => self.alu(x, y, |vx, vy| vx ^ vy),
            AddRegisters { x, y } => self.addr(x, y),
            Sub { x, y } => self.sub(x, y),
            ShiftRight { x } => self.shr(x),
            SubN { x, y } => self.subn(x, y),
            ShiftLeft { x } => self.shl(x),
            SkipRegistersNotEqual { x, y } => {
                self.skip_if(self.registers.v(x) != self.registers.v(y))
            }
            LoadI { addr } => self.registers.set_i(addr),
            JumpOffset { addr } => self.jumpi(addr),
            Random { x, nn } => self.registers.set_v(x, rng.gen::<u8>() & nn),
            Draw { x, y, n } => self.draw(x, y, n)?,
            SkipPressed { x } => self.skip_if(keypad.is_pressed(self.registers.v(x))),
            SkipNotPressed { x } => self.skip_if(!keypad.is_pressed(self.registers.v(x))),
            LoadDelay { x } => self.registers.set_v(x, self.timers.get(Timer::Delay)),
            AwaitKey { x } => self.keyd(x, keypad),
            SetDelay { x } => self.timers.set(Timer::Delay, self.registers.v(x)),
            SetSound { x } => self.timers.set(Timer::Sound, self.registers.v(x)),
            AddI { x } => self.addi(x),
            LoadSprite { x } => self
                .registers
                .set_i(u16::from(self.registers.v(x)) * SPRITE_HEIGHT),
            StoreBcd { x } => self.bcd(x)?,
            StoreRegisters { x } => self.stor(x)?,
            ReadRegisters { x } => self.read(x)?,
            Ignored(op) => tracing::debug!("ignoring unassigned opcode {}", op),
        }
        Ok(())
    }

    /// clear
    fn clr(&mut self) {
        self.frame_buffer.clear();
        self.draw_flag = true;
    }

    /// PC = STACK.pop()
    fn rts(&mut self) -> Result<(), Fault> {
        let addr = self.registers.pop()?;
        self.registers.set_pc(addr);
        Ok(())
    }

    /// STACK.push(PC); PC = addr
    fn call(&mut self, addr: u16) -> Result<(), Fault> {
        self.registers.push(self.registers.pc())?;
        self.registers.set_pc(addr);
        Ok(())
    }

    /// if condition then PC += 2
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.registers.skip();
        }
    }

    /// Vx += nn
    /// Overflow is dropped and VF is left alone
    fn add(&mut self, x: u8, nn: u8) {
        self.registers.set_v(x, self.registers.v(x).wrapping_add(nn));
    }

    /// Vx = f(Vx, Vy)
    fn alu(&mut self, x: u8, y: u8, f: impl Fn(u8, u8) -> u8) {
        let res = f(self.registers.v(x), self.registers.v(y));
        self.registers.set_v(x, res);
    }

    /// Writes VF, then computes Vx from the registers as they stand after the flag write,
    /// so an operand or result of VF sees the new flag
    fn flag_then(&mut self, x: u8, flag: bool, res: impl Fn(&Registers) -> u8) {
        self.registers.set_v(0xF, u8::from(flag));
        let res = res(&self.registers);
        self.registers.set_v(x, res);
    }

    /// Vx += Vy; VF = carry
    /// The sum is taken before VF is written
    fn addr(&mut self, x: u8, y: u8) {
        let (sum, carry) = self.registers.v(x).overflowing_add(self.registers.v(y));
        self.flag_then(x, carry, |_| sum);
    }

    /// VF = Vx > Vy; Vx -= Vy
    fn sub(&mut self, x: u8, y: u8) {
        let flag = self.registers.v(x) > self.registers.v(y);
        self.flag_then(x, flag, |r| r.v(x).wrapping_sub(r.v(y)));
    }

    /// VF = Vx & 1; Vx >>= 1
    fn shr(&mut self, x: u8) {
        let flag = self.registers.v(x) & 0x1 == 0x1;
        self.flag_then(x, flag, |r| r.v(x) >> 1);
    }

    /// VF = Vy > Vx; Vx = Vy - Vx
    fn subn(&mut self, x: u8, y: u8) {
        let flag = self.registers.v(y) > self.registers.v(x);
        self.flag_then(x, flag, |r| r.v(y).wrapping_sub(r.v(x)));
    }

    /// VF = Vx >> 7; Vx <<= 1
    fn shl(&mut self, x: u8) {
        let flag = self.registers.v(x) >> 7 == 0x1;
        self.flag_then(x, flag, |r| r.v(x) << 1);
    }

    /// PC = V0 + addr
    fn jumpi(&mut self, addr: u16) {
        self.registers
            .set_pc(u16::from(self.registers.v(0x0)) + addr);
    }

    /// draw_sprite(x=Vx y=Vy size=n)
    /// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
    /// VF = 1 if any pixels were erased, otherwise 0
    fn draw(&mut self, x: u8, y: u8, n: u8) -> Result<(), Fault> {
        let sprite = self.memory.read_range(self.registers.i(), n as usize)?;
        let collided = self.frame_buffer.draw_sprite(
            self.registers.v(x) as usize,
            self.registers.v(y) as usize,
            sprite,
        );
        self.registers.set_v(0xF, u8::from(collided));
        self.draw_flag = true;
        Ok(())
    }

    /// await keypress for Vx
    /// Rewinds PC so this instruction runs again next cycle until some key is held
    fn keyd(&mut self, x: u8, keypad: &Keypad) {
        match keypad.first_pressed() {
            Some(key) => {
                self.registers.set_v(x, key);
                self.execution = Execution::Running;
            }
            None => {
                self.registers.set_pc(self.registers.pc().wrapping_sub(2));
                self.execution = Execution::WaitingForKey { register: x };
            }
        }
    }

    /// I += Vx
    fn addi(&mut self, x: u8) {
        let i = self.registers.i().wrapping_add(u16::from(self.registers.v(x)));
        self.registers.set_i(i);
    }

    /// mem[I..I+3] = bcd(Vx)
    fn bcd(&mut self, x: u8) -> Result<(), Fault> {
        let vx = self.registers.v(x);
        self.memory
            .write_range(self.registers.i(), &[vx / 100, vx / 10 % 10, vx % 10])
    }

    /// mem[I..=I+x] = V0..=Vx
    fn stor(&mut self, x: u8) -> Result<(), Fault> {
        self.memory
            .write_range(self.registers.i(), self.registers.v_range(x))
    }

    /// V0..=Vx = mem[I..=I+x]
    fn read(&mut self, x: u8) -> Result<(), Fault> {
        let bytes = self
            .memory
            .read_range(self.registers.i(), x as usize + 1)?;
        self.registers.set_v_range(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod test_operations {
    use super::*;
    use crate::opcode::Opcode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Runs `op` the way the CPU does: PC is bumped past it before execution
    fn run_with_keys(state: &mut State, op: u16, keypad: Keypad) -> Result<(), Fault> {
        let mut rng = StdRng::seed_from_u64(0x8);
        state.registers.skip();
        let instruction = Instruction::decode(Opcode(op))?;
        state.execute(instruction, &keypad, &mut rng)
    }

    fn run(state: &mut State, op: u16) -> Result<(), Fault> {
        run_with_keys(state, op, Keypad::new())
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer.draw_sprite(0, 0, &[0xFF]);
        run(&mut state, 0x00E0).unwrap();
        assert_eq!(state.frame_buffer, crate::FrameBuffer::new());
        assert!(state.draw_flag);
    }

    #[test]
    fn test_2nnn_call_then_00ee_ret() {
        let mut state = State::new();
        run(&mut state, 0x2ABC).unwrap();
        assert_eq!(state.registers.pc(), 0x0ABC);
        assert_eq!(state.registers.stack_depth(), 1);
        run(&mut state, 0x00EE).unwrap();
        // returns to the instruction after the call
        assert_eq!(state.registers.pc(), 0x0202);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let mut state = State::new();
        assert_eq!(run(&mut state, 0x00EE), Err(Fault::StackUnderflow));
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        run(&mut state, 0x1ABC).unwrap();
        assert_eq!(state.registers.pc(), 0x0ABC);
    }

    #[test]
    fn test_3xnn_se_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.registers.pc(), 0x0204);
    }

    #[test]
    fn test_3xnn_se_doesntskip() {
        let mut state = State::new();
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.registers.pc(), 0x0202);
    }

    #[test]
    fn test_4xnn_sne_skips() {
        let mut state = State::new();
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.registers.pc(), 0x0204);
    }

    #[test]
    fn test_4xnn_sne_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.registers.pc(), 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        state.registers.set_v(0x2, 0x11);
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.registers.pc(), 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.registers.pc(), 0x0202);
    }

    #[test]
    fn test_6xnn_ld() {
        let mut state = State::new();
        run(&mut state, 0x6122).unwrap();
        assert_eq!(state.registers.v(0x1), 0x22);
    }

    #[test]
    fn test_7xnn_add_wraps_without_carry() {
        let mut state = State::new();
        run(&mut state, 0x71F0).unwrap();
        run(&mut state, 0x7120).unwrap();
        assert_eq!(state.registers.v(0x1), 0x10);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.registers.set_v(0x2, 0x1);
        run(&mut state, 0x8120).unwrap();
        assert_eq!(state.registers.v(0x1), 0x1);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_bitwise() {
        for (op, expected) in [(0x8121, 0x7), (0x8122, 0x2), (0x8123, 0x5)] {
            let mut state = State::new();
            state.registers.set_v(0x1, 0x6);
            state.registers.set_v(0x2, 0x3);
            run(&mut state, op).unwrap();
            assert_eq!(state.registers.v(0x1), expected, "opcode {:04X}", op);
        }
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.registers.set_v(0x1, 250);
        state.registers.set_v(0x2, 10);
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.registers.v(0x1), 4);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.registers.set_v(0x1, 1);
        state.registers.set_v(0x2, 1);
        state.registers.set_v(0xF, 0x1);
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.registers.v(0x1), 2);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 5);
        state.registers.set_v(0x2, 10);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.v(0x1), 251);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 10);
        state.registers.set_v(0x2, 5);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.v(0x1), 5);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy5_sub_equal_clears_flag() {
        let mut state = State::new();
        state.registers.set_v(0x1, 7);
        state.registers.set_v(0x2, 7);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.v(0x1), 0);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x5);
        run(&mut state, 0x8106).unwrap();
        assert_eq!(state.registers.v(0x1), 0x2);
        assert_eq!(state.registers.v(0xF), 0x1);

        run(&mut state, 0x8106).unwrap();
        assert_eq!(state.registers.v(0x1), 0x1);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        state.registers.set_v(0x2, 0x33);
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.registers.v(0x1), 0x22);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x12);
        state.registers.set_v(0x2, 0x11);
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.registers.v(0x1), 0xFF);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xye_shl() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        run(&mut state, 0x810E).unwrap();
        assert_eq!(state.registers.v(0x1), 0xFE);
        assert_eq!(state.registers.v(0xF), 0x1);

        state.registers.set_v(0x1, 0x4);
        run(&mut state, 0x810E).unwrap();
        assert_eq!(state.registers.v(0x1), 0x8);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8fy4_add_into_vf_keeps_sum() {
        let mut state = State::new();
        state.registers.set_v(0xF, 0xFF);
        state.registers.set_v(0x1, 0x3);
        run(&mut state, 0x8F14).unwrap();
        assert_eq!(state.registers.v(0xF), 0x2);
    }

    #[test]
    fn test_8xf5_sub_reads_vf_after_flag() {
        let mut state = State::new();
        state.registers.set_v(0x1, 10);
        state.registers.set_v(0xF, 3);
        run(&mut state, 0x81F5).unwrap();
        // VF = 1 (10 > 3) is written first, then V1 = 10 - 1
        assert_eq!(state.registers.v(0xF), 0x1);
        assert_eq!(state.registers.v(0x1), 9);
    }

    #[test]
    fn test_8f06_shr_of_vf_shifts_flag() {
        let mut state = State::new();
        state.registers.set_v(0xF, 0x4);
        run(&mut state, 0x8F06).unwrap();
        // VF = 4 & 1 = 0, then VF = 0 >> 1
        assert_eq!(state.registers.v(0xF), 0x0);

        state.registers.set_v(0xF, 0x5);
        run(&mut state, 0x8F06).unwrap();
        // VF = 1, then VF = 1 >> 1
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xf7_subn_reads_vf_after_flag() {
        let mut state = State::new();
        state.registers.set_v(0x1, 2);
        state.registers.set_v(0xF, 9);
        run(&mut state, 0x81F7).unwrap();
        // VF = 1 (9 > 2) is written first, then V1 = 1 - 2
        assert_eq!(state.registers.v(0xF), 0x1);
        assert_eq!(state.registers.v(0x1), 0xFF);
    }

    #[test]
    fn test_8f0e_shl_of_vf_shifts_flag() {
        let mut state = State::new();
        state.registers.set_v(0xF, 0x81);
        run(&mut state, 0x8F0E).unwrap();
        // VF = 1, then VF = 1 << 1
        assert_eq!(state.registers.v(0xF), 0x2);

        state.registers.set_v(0xF, 0x40);
        run(&mut state, 0x8F0E).unwrap();
        // VF = 0, then VF = 0 << 1
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xyn_unassigned_is_noop() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        run(&mut state, 0x8128).unwrap();
        assert_eq!(state.registers.v(0x1), 0x6);
        assert_eq!(state.registers.pc(), 0x0202);
    }

    #[test]
    fn test_9xy0_sne() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.registers.pc(), 0x0204);

        state.registers.set_v(0x2, 0x11);
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.registers.pc(), 0x0206);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        run(&mut state, 0xAABC).unwrap();
        assert_eq!(state.registers.i(), 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x2);
        run(&mut state, 0xBABC).unwrap();
        assert_eq!(state.registers.pc(), 0xABE);
    }

    #[test]
    fn test_cxnn_rand_is_masked() {
        let mut state = State::new();
        run(&mut state, 0xC10F).unwrap();
        assert_eq!(state.registers.v(0x1) & 0xF0, 0x0);
        run(&mut state, 0xC200).unwrap();
        assert_eq!(state.registers.v(0x2), 0x0);
    }

    #[test]
    fn test_cxnn_rand_is_reproducible() {
        let mut first = State::new();
        let mut second = State::new();
        run(&mut first, 0xC1FF).unwrap();
        run(&mut second, 0xC1FF).unwrap();
        assert_eq!(first.registers.v(0x1), second.registers.v(0x1));
    }

    #[test]
    fn test_dxyn_drw_draws_glyph() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x1);
        // Draw the 0x0 sprite with a 1x 1y offset
        run(&mut state, 0xD005).unwrap();
        let expected = [
            [1, 1, 1, 1],
            [1, 0, 0, 1],
            [1, 0, 0, 1],
            [1, 0, 0, 1],
            [1, 1, 1, 1],
        ];
        for (row, pixels) in expected.iter().enumerate() {
            for (col, &pixel) in pixels.iter().enumerate() {
                assert_eq!(state.frame_buffer.pixel(col + 1, row + 1), pixel == 1);
            }
        }
        assert_eq!(state.registers.v(0xF), 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_twice_erases_and_collides() {
        let mut state = State::new();
        run(&mut state, 0xD005).unwrap();
        run(&mut state, 0xD005).unwrap();
        assert_eq!(state.registers.v(0xF), 0x1);
        assert_eq!(state.frame_buffer, crate::FrameBuffer::new());

        // the flag is rewritten by every draw
        run(&mut state, 0xD005).unwrap();
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_dxyn_drw_past_end_of_memory() {
        let mut state = State::new();
        state.registers.set_i(0xFFC);
        assert_eq!(
            run(&mut state, 0xD005),
            Err(Fault::OutOfBounds { addr: 0xFFC, len: 5 })
        );
    }

    #[test]
    fn test_ex9e_skp() {
        let mut keypad = Keypad::new();
        keypad.set_key(0xE, true);
        let mut state = State::new();
        state.registers.set_v(0x1, 0xE);
        run_with_keys(&mut state, 0xE19E, keypad).unwrap();
        assert_eq!(state.registers.pc(), 0x0204);
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.registers.pc(), 0x0206);
    }

    #[test]
    fn test_exa1_sknp() {
        let mut keypad = Keypad::new();
        keypad.set_key(0xE, true);
        let mut state = State::new();
        state.registers.set_v(0x1, 0xE);
        run_with_keys(&mut state, 0xE1A1, keypad).unwrap();
        assert_eq!(state.registers.pc(), 0x0202);
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.registers.pc(), 0x0206);
    }

    #[test]
    fn test_fx07_fx15_fx18_timers() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xF);
        run(&mut state, 0xF115).unwrap();
        run(&mut state, 0xF118).unwrap();
        assert_eq!(state.timers.get(Timer::Delay), 0xF);
        assert_eq!(state.timers.get(Timer::Sound), 0xF);
        run(&mut state, 0xF207).unwrap();
        assert_eq!(state.registers.v(0x2), 0xF);
    }

    #[test]
    fn test_fx0a_without_key_waits() {
        let mut state = State::new();
        run(&mut state, 0xF30A).unwrap();
        assert_eq!(state.registers.pc(), 0x0200);
        assert_eq!(state.execution, Execution::WaitingForKey { register: 0x3 });
    }

    #[test]
    fn test_fx0a_takes_lowest_key() {
        let mut keypad = Keypad::new();
        keypad.set_key(0x9, true);
        keypad.set_key(0x4, true);
        let mut state = State::new();
        state.execution = Execution::WaitingForKey { register: 0x3 };
        run_with_keys(&mut state, 0xF30A, keypad).unwrap();
        assert_eq!(state.registers.v(0x3), 0x4);
        assert_eq!(state.registers.pc(), 0x0202);
        assert_eq!(state.execution, Execution::Running);
    }

    #[test]
    fn test_fx1e_add_wraps() {
        let mut state = State::new();
        state.registers.set_i(0xFFFF);
        state.registers.set_v(0x1, 0x2);
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.registers.i(), 0x1);
    }

    #[test]
    fn test_fx29_ld_sprite() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x2);
        run(&mut state, 0xF129).unwrap();
        assert_eq!(state.registers.i(), 0xA);
    }

    #[test]
    fn test_fx33_bcd() {
        let mut state = State::new();
        state.registers.set_v(0x1, 157);
        state.registers.set_i(0x300);
        run(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory.read_range(0x300, 3).unwrap(), &[1, 5, 7]);
    }

    #[test]
    fn test_fx55_stor() {
        let mut state = State::new();
        state.registers.set_i(0x300);
        state.registers.set_v_range(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        run(&mut state, 0xF455).unwrap();
        assert_eq!(
            state.memory.read_range(0x300, 6).unwrap(),
            &[0x1, 0x2, 0x3, 0x4, 0x5, 0x0]
        );
        // I is left where it was
        assert_eq!(state.registers.i(), 0x300);
    }

    #[test]
    fn test_fx65_read() {
        let mut state = State::new();
        state.registers.set_i(0x300);
        state
            .memory
            .write_range(0x300, &[0x1, 0x2, 0x3, 0x4, 0x5])
            .unwrap();
        run(&mut state, 0xF465).unwrap();
        assert_eq!(state.registers.v_range(0x5), &[0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
    }

    #[test]
    fn test_fx55_then_fx65_restores_registers() {
        let mut state = State::new();
        state.registers.set_i(0x300);
        state.registers.set_v_range(&[0xDE, 0xAD, 0xBE, 0xEF]);
        run(&mut state, 0xF355).unwrap();
        state.registers.set_v_range(&[0x0; 4]);
        run(&mut state, 0xF365).unwrap();
        assert_eq!(state.registers.v_range(0x3), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_fx55_past_end_of_memory() {
        let mut state = State::new();
        state.registers.set_i(0xFFE);
        assert_eq!(
            run(&mut state, 0xF155),
            Err(Fault::OutOfBounds { addr: 0xFFE, len: 2 })
        );
    }

    #[test]
    fn test_fxnn_unassigned_is_noop() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        run(&mut state, 0xF1FF).unwrap();
        assert_eq!(state.registers.v(0x1), 0x6);
        assert_eq!(state.registers.pc(), 0x0202);
    }
}
