use slotmap::new_key_type;

new_key_type! {
    pub struct OtusKey;
    pub struct OtuKey;
    pub struct NodeKey;
    pub struct EdgeKey;
    pub struct RootEdgeKey;
    pub struct TreeKey;
    pub struct TreesKey;
}
