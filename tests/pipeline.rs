use std::fs;

use anyhow::Result;
use byteorder::{BigEndian, ByteOrder};
use tempfile::TempDir;

use abifgen::{
    build_abif, generate, generate_with_config, run_gen, write_abif_path, AbifData,
    GeneratorConfig, SIZE_DIR_ENTRY, SIZE_HEADER,
};

/// Minimal view of one directory entry, enough to check generated files
#[derive(Debug)]
struct Entry {
    name: String,
    tag: i32,
    etype: i16,
    count: i32,
    data: Vec<u8>,
}

fn directory(buf: &[u8]) -> Vec<Entry> {
    assert_eq!(&buf[0..4], b"ABIF");
    assert_eq!(BigEndian::read_u16(&buf[4..6]), 101);
    let count = BigEndian::read_i32(&buf[18..22]) as usize;
    let start = BigEndian::read_u32(&buf[26..30]) as usize;
    assert_eq!(buf.len(), start + count * SIZE_DIR_ENTRY);

    (0..count)
        .map(|ix| {
            let e = &buf[start + ix * SIZE_DIR_ENTRY..start + (ix + 1) * SIZE_DIR_ENTRY];
            let size = BigEndian::read_i32(&e[16..20]) as usize;
            let data = if size <= 4 {
                e[20..20 + size].to_vec()
            } else {
                let offset = BigEndian::read_u32(&e[20..24]) as usize;
                assert!(offset >= SIZE_HEADER);
                buf[offset..offset + size].to_vec()
            };
            Entry {
                name: String::from_utf8_lossy(&e[0..4]).into_owned(),
                tag: BigEndian::read_i32(&e[4..8]),
                etype: BigEndian::read_i16(&e[8..10]),
                count: BigEndian::read_i32(&e[12..16]),
                data,
            }
        })
        .collect()
}

fn find<'a>(entries: &'a [Entry], name: &str, tag: i32) -> &'a Entry {
    entries
        .iter()
        .find(|e| e.name == name && e.tag == tag)
        .unwrap_or_else(|| panic!("missing {name}:{tag}"))
}

fn shorts(data: &[u8]) -> Vec<i16> {
    data.chunks(2).map(BigEndian::read_i16).collect()
}

#[test]
fn test_generated_file_contents() -> Result<()> {
    let config = GeneratorConfig::builder().curve(vec![100.0]).build()?;
    let buf = generate_with_config("mix", &[(0.2, "A"), (0.5, "AT"), (0.8, "G")], &config)?;
    let entries = directory(&buf);
    assert_eq!(entries.len(), 15);

    let fwo = find(&entries, "FWO_", 1);
    assert_eq!(fwo.etype, 2);
    assert_eq!(fwo.data, b"GATC");

    assert_eq!(shorts(&find(&entries, "LANE", 1).data), vec![1]);

    let smpl = find(&entries, "SMPL", 1);
    assert_eq!(smpl.etype, 18);
    assert_eq!(smpl.count, 4);
    assert_eq!(smpl.data, b"\x03mix");

    for tag in [1, 2] {
        assert_eq!(find(&entries, "PBAS", tag).data, b"RT");
        assert_eq!(find(&entries, "PDMF", tag).data[0], 22);
    }

    // curve of length 1: mid peak is 0 for every base
    assert_eq!(shorts(&find(&entries, "PLOC", 1).data), vec![0, 0]);
    assert_eq!(shorts(&find(&entries, "DATA", 9).data), vec![80, 0]);
    assert_eq!(shorts(&find(&entries, "DATA", 10).data), vec![70, 0]);
    assert_eq!(shorts(&find(&entries, "DATA", 11).data), vec![0, 50]);
    assert_eq!(shorts(&find(&entries, "DATA", 12).data), vec![0, 0]);
    Ok(())
}

#[test]
fn test_default_curve_file() -> Result<()> {
    let buf = generate("one", &[(1.0, "ACGT")])?;
    let entries = directory(&buf);

    assert_eq!(shorts(&find(&entries, "PLOC", 2).data), vec![5, 10, 15, 20]);
    let g = shorts(&find(&entries, "DATA", 9).data);
    assert_eq!(g.len(), 40);
    assert_eq!(&g[20..30], &[0, 0, 128, 512, 1024, 1024, 512, 128, 0, 0]);
    assert!(g[..20].iter().chain(&g[30..]).all(|&v| v == 0));
    assert_eq!(shorts(&find(&entries, "S/N%", 1).data), vec![53, 75, 79, 48]);
    Ok(())
}

#[test]
fn test_write_abif_path() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("demo.ab1");
    let records = vec![
        AbifData::data_byte("dat1", 1, &[1, 2, 3, 4]),
        AbifData::data_char("dat3", 1, "ABcdef!!"),
    ];
    write_abif_path(&path, &mut records.clone())?;
    assert_eq!(fs::read(&path)?, build_abif(&mut records.clone())?);
    Ok(())
}

#[test]
fn test_run_gen_directory() -> Result<()> {
    let src = TempDir::new()?;
    let dest = TempDir::new()?;
    fs::write(src.path().join("a.fasta"), ">{0.5} s1\nACGT\n>s2\nGG\n")?;
    fs::write(src.path().join("b.fasta"), ";second run\n>{0.5} s1\nACCT\n")?;
    fs::write(src.path().join("notes.txt"), "not a fasta file")?;

    let written = run_gen(src.path(), dest.path(), &GeneratorConfig::default())?;
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["s1.ab1", "s2.ab1"]);

    let s1 = fs::read(dest.path().join("s1.ab1"))?;
    assert_eq!(s1, generate("s1", &[(0.5, "ACGT"), (0.5, "ACCT")])?);
    assert_eq!(find(&directory(&s1), "PBAS", 1).data, b"ACST");
    Ok(())
}

#[test]
fn test_run_gen_single_file() -> Result<()> {
    let src = TempDir::new()?;
    let dest = TempDir::new()?;
    let input = src.path().join("input.wfa");
    fs::write(&input, ">R x/y\nAACG\n")?;

    let written = run_gen(&input, dest.path(), &GeneratorConfig::default())?;
    assert_eq!(written, vec![dest.path().join("x_y.ab1")]);

    // complemented, not reversed
    let entries = directory(&fs::read(&written[0])?);
    assert_eq!(find(&entries, "PBAS", 1).data, b"TTGC");
    Ok(())
}

#[test]
fn test_run_gen_sanitized_names_do_not_collide() -> Result<()> {
    let src = TempDir::new()?;
    let dest = TempDir::new()?;
    let input = src.path().join("names.fasta");
    fs::write(&input, ">a/b\nAAAA\n>a_b\nCCCC\n")?;

    let written = run_gen(&input, dest.path(), &GeneratorConfig::default())?;
    assert_eq!(
        written,
        vec![dest.path().join("a_b.ab1"), dest.path().join("a_b_2.ab1")]
    );
    assert_eq!(fs::read_dir(dest.path())?.count(), 2);

    assert_eq!(find(&directory(&fs::read(&written[0])?), "PBAS", 1).data, b"AAAA");
    assert_eq!(find(&directory(&fs::read(&written[1])?), "PBAS", 1).data, b"CCCC");
    Ok(())
}

#[test]
fn test_run_gen_parse_error_writes_nothing() -> Result<()> {
    let src = TempDir::new()?;
    let dest = TempDir::new()?;
    fs::write(src.path().join("a.fasta"), ">ok\nAC\n")?;
    fs::write(src.path().join("b.fasta"), "no header here\n")?;

    assert!(run_gen(src.path(), dest.path(), &GeneratorConfig::default()).is_err());
    assert_eq!(fs::read_dir(dest.path())?.count(), 0);
    Ok(())
}
