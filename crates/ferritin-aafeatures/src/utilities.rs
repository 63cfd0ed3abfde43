use crate::error::Result;
use candle_core::{Device, Tensor};
use ndarray::{Array, ArrayD, Dimension, IxDyn};

pub fn ndarray_to_tensor_f32<D: Dimension>(arr: &Array<f32, D>, device: &Device) -> Result<Tensor> {
    let shape = arr.shape().to_vec();
    let data: Vec<f32> = arr.iter().copied().collect();
    Ok(Tensor::from_vec(data, shape, device)?)
}

pub fn tensor_to_ndarray_f32(tensor: &Tensor) -> Result<ArrayD<f32>> {
    let shape = tensor.dims().to_vec();
    let data = tensor.flatten_all()?.to_vec1::<f32>()?;
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), data)?)
}
