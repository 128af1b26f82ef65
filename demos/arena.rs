use std::ptr::{self, NonNull};

use rarena::Arena;

const REGION_SIZE: usize = 128;

/// Prints every block of the arena, one per line.
fn print_blocks(
  label: &str,
  arena: &Arena<'_>,
) {
  println!("\n[{}] free bytes = {}", label, arena.free_bytes());
  for block in arena.blocks() {
    println!(
      "    offset {:>4}  size {:>4}  {}",
      block.offset,
      block.size,
      if block.allocated { "USED" } else { "FREE" }
    );
  }
}

fn main() {
  unsafe {
    // The arena never allocates; the caller reserves the region up front.
    let region = libc::malloc(REGION_SIZE) as *mut u8;
    let Some(base) = NonNull::new(region) else {
      eprintln!("malloc({}) failed", REGION_SIZE);
      return;
    };

    let mut arena = match Arena::from_raw_parts(base, REGION_SIZE) {
      Ok(arena) => arena,
      Err(error) => {
        eprintln!("cannot build arena: {}", error);
        libc::free(region as *mut libc::c_void);
        return;
      }
    };
    print_blocks("start", &arena);

    // --------------------------------------------------------------------
    // 1) Allocate a u32. 4 bytes of payload plus the 4-byte header.
    // --------------------------------------------------------------------
    let Some(first) = arena.allocate(4) else { return };
    first.cast::<u32>().write_unaligned(0xDEADBEEF);
    println!("\n[1] first = {:?}, value = 0x{:X}", first, first.cast::<u32>().read_unaligned());
    print_blocks("1", &arena);

    // --------------------------------------------------------------------
    // 2) Allocate 13 bytes, rounded up to 16.
    // --------------------------------------------------------------------
    let Some(second) = arena.allocate(13) else { return };
    ptr::write_bytes(second.as_ptr(), 0xAB, 13);
    print_blocks("2", &arena);

    // --------------------------------------------------------------------
    // 3) A third block keeps the second one pinned in the middle.
    // --------------------------------------------------------------------
    let Some(third) = arena.allocate(8) else { return };
    print_blocks("3", &arena);

    // --------------------------------------------------------------------
    // 4) Free the first and third blocks. The third merges with the free
    //    tail, the first stays an isolated hole.
    // --------------------------------------------------------------------
    arena.release(first);
    arena.release(third);
    print_blocks("4", &arena);

    // --------------------------------------------------------------------
    // 5) Ask for exactly the free total. No single hole is that large.
    // --------------------------------------------------------------------
    let request = arena.free_bytes();
    println!("\n[5] allocate({}) -> {:?}", request, arena.allocate(request));

    // --------------------------------------------------------------------
    // 6) First fit reuses the hole at the start of the arena.
    // --------------------------------------------------------------------
    let Some(fourth) = arena.allocate(2) else { return };
    println!("\n[6] fourth == first? {}", fourth == first);
    print_blocks("6", &arena);

    // --------------------------------------------------------------------
    // 7) Release everything: one free block spans the region again.
    // --------------------------------------------------------------------
    arena.release(fourth);
    arena.release(second);
    print_blocks("7", &arena);

    // A pointer outside the region is ignored.
    let mut stray = 0u8;
    arena.release(NonNull::from(&mut stray));
    println!("\n[8] contains(stray) = {}", arena.contains(&stray));

    drop(arena);
    libc::free(region as *mut libc::c_void);
  }
}
