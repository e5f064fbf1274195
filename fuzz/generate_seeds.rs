#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // P6 2x2
    let p6 = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/p6_2x2.ppm"), p6).unwrap();

    // P3 2x1 on one line
    fs::write(format!("{dir}/p3_2x1.ppm"), b"P3 2 1 255\n255 0 0 0 255 0").unwrap();

    // Comments in the header and the ASCII raster
    let p3 = b"P3\n# gimp\n1 1\n# max\n15\n# first pixel\n1 2 3\n";
    fs::write(format!("{dir}/p3_comments.ppm"), p3).unwrap();

    // '#' as binary pixel data
    fs::write(format!("{dir}/p6_hash_data.ppm"), b"P6 1 1 255\n# \n").unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/unterminated_comment.bin"), b"P6\n# no newline").unwrap();
    fs::write(format!("{dir}/maxval_16bit.bin"), b"P6 1 1 65535\n\x00\x00\x00\x00\x00\x00").unwrap();
    fs::write(format!("{dir}/p6_short.bin"), b"P6 2 1 255\n\x01\x02\x03\x04\x05").unwrap();
    fs::write(format!("{dir}/p3_out_of_range.bin"), b"P3 1 1 100\n101 0 0\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
