pub mod ppsim_vis2d;
