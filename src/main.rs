use anyhow::{Context, Result};
use log::info;

use ndbuf::config::DemoConfig;
use ndbuf::{NdArray, OuterSlice};

type Array4D = NdArray<i32, 4>;
type Array3D = NdArray<i32, 3>;
type Array2D = NdArray<i32, 2>;

fn main() -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.init();

    let config = DemoConfig::load()?;
    run(&config)
}

fn run(config: &DemoConfig) -> Result<()> {
    // 4D array, assign and read back the last element
    let mut array4 = Array4D::with_extents(config.array4).context("building 4D array")?;
    let last = config.array4.map(|d| d - 1);
    array4[last] = 18;
    let mut val = array4[last];
    info!("array4{:?} = {}", last, val);

    // 3D array, grown then filled in row-major order
    let mut array3 = Array3D::with_extents(config.array3).context("building 3D array")?;
    array3.set_extents(config.grow_to).context("resizing 3D array")?;
    let [nz, ny, nx] = array3.extents();
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                array3[[z, y, x]] = val;
                val = val.wrapping_add(1);
            }
        }
    }
    println!("{}\n", array3);

    // 2D array by slicing the 3D array
    let array2: Array2D = array3.slice(config.slice_at).context("slicing 3D array")?;
    println!("{}\n", array2);

    // raw data back into a differently shaped array
    let data = array2.data();
    let array2_2 = Array2D::from_vec(config.reshape_2d, data.clone()).context("rebuilding 2D array")?;
    println!("{}\n", array2_2);

    // the element count does not match, report and carry on
    match Array2D::from_vec(config.bad_reshape_2d, data) {
        Ok(arr) => println!("unexpectedly built {:?}", arr.extents()),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}
